pub const DEFAULT_PATH: &str = "test.txt";
pub const DEFAULT_PAYLOAD: &[u8] = b"some great stuff";
pub const DEFAULT_MODE: u32 = 0o755;
/// Largest permission value accepted for a created file (setuid/setgid/sticky + rwx).
pub const MAX_MODE: u32 = 0o7777;
