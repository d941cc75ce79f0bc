mod constraint_test;
mod count_test;
mod distinct_test;
mod insert_test;
mod json_test;
mod remove_test;
mod save_test;
