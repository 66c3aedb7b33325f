use chrono::Utc;
use uuid::Uuid;

const SUFFIX_LEN: usize = 6;
const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Mints a booking reference: `BK-` + the last 8 digits of the
/// unix-millisecond clock + 6 random alphanumeric characters.
///
/// The value exists for display and search. Slot exclusivity is enforced
/// by the store on `(resource, date, time_slot)`, never on this string.
pub fn generate() -> String {
    let millis = Utc::now().timestamp_millis();
    let stamp = format!("{millis:08}");
    let stamp = &stamp[stamp.len() - 8..];

    let entropy = Uuid::new_v4();
    let suffix: String = entropy
        .as_bytes()
        .iter()
        .take(SUFFIX_LEN)
        .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
        .collect();

    format!("BK-{stamp}{suffix}")
}
