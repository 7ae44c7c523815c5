use once_cell::sync::Lazy;
use regex::Regex;

/// Column that carries the sequence number in the source CSV.
pub const SEQUENCE_COLUMN: &str = "stt";
/// Name the sequence column gets in the updated CSV.
pub const FILE_NAME_COLUMN: &str = "file_name";

static RECORDING_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Recording \(([0-9]+)\)\.wav$").expect("recording pattern"));

/// Extract `k` from a name of the exact form `Recording (k).wav`.
///
/// Digit runs too large for a `u64` yield `None`; no configured count could
/// reach them anyway.
pub fn parse_sequence(name: &str) -> Option<u64> {
    RECORDING_NAME
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Name a recording with sequence number `k` is renamed to.
pub fn target_name(k: u64) -> String {
    format!("audio{}-Tung.wav", k)
}

/// Original recording name for sequence number `k`.
pub fn recording_name(k: u64) -> String {
    format!("Recording ({}).wav", k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sequence_exact_match() {
        assert_eq!(parse_sequence("Recording (1).wav"), Some(1));
        assert_eq!(parse_sequence("Recording (306).wav"), Some(306));
        assert_eq!(parse_sequence("Recording (007).wav"), Some(7));
    }

    #[test]
    fn test_parse_sequence_rejects_near_misses() {
        for name in [
            "recording (1).wav",
            "Recording (1).WAV",
            "Recording (1).mp3",
            "Recording 1.wav",
            "Recording ().wav",
            "Recording (a).wav",
            "Recording (-1).wav",
            "xRecording (1).wav",
            "Recording (1).wav.bak",
            "Recording  (1).wav",
            "Recording (1) .wav",
        ] {
            assert_eq!(parse_sequence(name), None, "{name} should not match");
        }
    }

    #[test]
    fn test_parse_sequence_overflow_is_none() {
        assert_eq!(parse_sequence("Recording (99999999999999999999999).wav"), None);
    }

    #[test]
    fn test_target_name_template() {
        assert_eq!(target_name(1), "audio1-Tung.wav");
        assert_eq!(target_name(306), "audio306-Tung.wav");
        assert_eq!(recording_name(12), "Recording (12).wav");
    }
}
