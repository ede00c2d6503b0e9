/// FFmpeg command assertion utilities
#[allow(dead_code)]
pub fn assert_cmd_contains(cmd: &str, fragment: &str) {
    assert!(
        cmd.contains(fragment),
        "Expected FFmpeg command to contain '{}' but it didn't.\nCommand: {}",
        fragment,
        cmd
    );
}

/// Check if a command string does NOT contain a specific fragment
#[allow(dead_code)]
pub fn assert_cmd_not_contains(cmd: &str, fragment: &str) {
    assert!(
        !cmd.contains(fragment),
        "Expected FFmpeg command to NOT contain '{}' but it did.\nCommand: {}",
        fragment,
        cmd
    );
}

/// Check if a command contains a flag with a specific value
#[allow(dead_code)]
pub fn assert_cmd_has_flag_value(cmd: &str, flag: &str, value: &str) {
    let pattern = format!("{} {}", flag, value);
    assert!(
        cmd.contains(&pattern),
        "Expected FFmpeg command to contain '{}' but it didn't.\nCommand: {}",
        pattern,
        cmd
    );
}

/// Parse a flag value from the command (e.g., get "30" from "-crf 30")
#[allow(dead_code)]
pub fn get_flag_value<'a>(cmd: &'a str, flag: &str) -> Option<&'a str> {
    let pattern = format!("{} ", flag);
    cmd.find(&pattern).and_then(|pos| {
        let after_flag = &cmd[pos + pattern.len()..];
        after_flag.split_whitespace().next()
    })
}

/// Assert that `first` occurs in the command strictly before `second`
#[allow(dead_code)]
pub fn assert_cmd_order(cmd: &str, first: &str, second: &str) {
    let a = cmd
        .find(first)
        .unwrap_or_else(|| panic!("'{}' not found in command: {}", first, cmd));
    let b = cmd
        .find(second)
        .unwrap_or_else(|| panic!("'{}' not found in command: {}", second, cmd));
    assert!(
        a < b,
        "Expected '{}' before '{}' in command: {}",
        first,
        second,
        cmd
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_flag_value() {
        let cmd = "ffmpeg -i input.mp4 -crf 30 -b:a 128k output.webm";
        assert_eq!(get_flag_value(cmd, "-crf"), Some("30"));
        assert_eq!(get_flag_value(cmd, "-b:a"), Some("128k"));
        assert_eq!(get_flag_value(cmd, "-nonexistent"), None);
    }

    #[test]
    #[should_panic(expected = "Expected FFmpeg command to contain")]
    fn test_assert_cmd_contains_fails() {
        let cmd = "ffmpeg -i input.mp4";
        assert_cmd_contains(cmd, "-nonexistent");
    }

    #[test]
    fn test_assert_cmd_order() {
        assert_cmd_order("scale=1:2,pad=x", "scale=", "pad=");
    }
}
