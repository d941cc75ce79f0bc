use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Length of a generated document id in hexadecimal characters.
pub const ID_LENGTH: usize = 24;

/// Generates 24-character lowercase hexadecimal document ids.
///
/// Each id encodes 12 bytes: a 4-byte big-endian unix timestamp, a 5-byte
/// random generator value fixed at startup, and a 3-byte counter seeded
/// randomly and incremented per id. Ids generated by one process are therefore
/// roughly time-ordered and collision-free; ids from distinct processes
/// collide only if their random values coincide.
pub struct ObjectIdGenerator {
    process_random: [u8; 5],
    counter: AtomicU32,
}

impl ObjectIdGenerator {
    pub fn new() -> Self {
        let mut process_random = [0u8; 5];
        OsRng.fill_bytes(&mut process_random);

        let seed = OsRng.next_u32();
        log::debug!("Initialized id generator with counter seed {}", seed);

        ObjectIdGenerator {
            process_random,
            counter: AtomicU32::new(seed),
        }
    }

    /// Generates a fresh 24-character lowercase hex id.
    pub fn generate(&self) -> String {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        let count = self.counter.fetch_add(1, Ordering::Relaxed);

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&timestamp.to_be_bytes());
        bytes[4..9].copy_from_slice(&self.process_random);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);

        let mut id = String::with_capacity(ID_LENGTH);
        for byte in bytes {
            id.push_str(&format!("{:02x}", byte));
        }
        id
    }
}

impl Default for ObjectIdGenerator {
    fn default() -> Self {
        ObjectIdGenerator::new()
    }
}
