//! 文件大小格式化
//!
//! 以 1024 为基数逐级换算，数值保留两位小数并去掉末尾的 0。

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// 将字节数格式化为可读字符串
///
/// `0 → "0 Bytes"`, `1536 → "1.5 KB"`, `1073741824 → "1 GB"`。
/// 超过 GB 的值仍以 GB 表示。
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    // 等价于 floor(log(bytes) / log(1024))，用整数运算避免浮点误差
    let mut index = 0;
    while index + 1 < SIZE_UNITS.len() && bytes >= 1024u64.pow(index as u32 + 1) {
        index += 1;
    }

    let mut rounded = round_in_unit(bytes, index);
    // 1023.999 KB 之类的值舍入后会进位成 1024，改用下一级单位
    if rounded >= 1024.0 && index + 1 < SIZE_UNITS.len() {
        index += 1;
        rounded = round_in_unit(bytes, index);
    }
    format!("{} {}", rounded, SIZE_UNITS[index])
}

fn round_in_unit(bytes: u64, index: usize) -> f64 {
    let value = bytes as f64 / 1024f64.powi(index as i32);
    (value * 100.0).round() / 100.0
}

/// 解析 `format_file_size` 的输出，返回对应的字节数（四舍五入）
pub fn parse_file_size(text: &str) -> Option<u64> {
    let (number, unit) = text.trim().split_once(' ')?;
    let value: f64 = number.parse().ok()?;
    let index = SIZE_UNITS.iter().position(|u| *u == unit)?;
    if value < 0.0 {
        return None;
    }
    Some((value * 1024f64.powi(index as i32)).round() as u64)
}

/// 以整数 MB 表示大小，用于限制提示
pub fn format_megabytes(bytes: u64) -> String {
    format!("{}MB", (bytes as f64 / 1024.0 / 1024.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(52_428_800), "50 MB");
        assert_eq!(format_file_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn test_two_decimal_rounding() {
        // 2.3330078125 KB
        assert_eq!(format_file_size(2389), "2.33 KB");
        // 超出 GB 仍按 GB 显示
        assert_eq!(format_file_size(2 * 1024 * 1_073_741_824), "2048 GB");
    }

    #[test]
    fn test_rounding_up_moves_to_next_unit() {
        assert_eq!(format_file_size(1_048_575), "1 MB");
        assert_eq!(format_file_size(1_073_741_823), "1 GB");
        assert_eq!(format_file_size(1_048_570), "1023.99 KB");
    }

    #[test]
    fn test_reformatting_is_idempotent() {
        for bytes in [
            0u64,
            1,
            999,
            1536,
            2389,
            1_048_575,
            1_048_577,
            52_428_800,
            1_073_741_823,
            1_073_741_824,
            7_777_777_777,
        ] {
            let first = format_file_size(bytes);
            let reparsed = parse_file_size(&first).unwrap();
            assert_eq!(format_file_size(reparsed), first, "bytes = {}", bytes);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_file_size("1.5 KB"), Some(1536));
        assert_eq!(parse_file_size("1.5KB"), None);
        assert_eq!(parse_file_size("1 TB"), None);
    }

    #[test]
    fn test_megabytes() {
        assert_eq!(format_megabytes(52_428_800), "50MB");
        assert_eq!(format_megabytes(209_715_200), "200MB");
    }
}
