//! Human-readable size parsing: a decimal byte count with an optional
//! B/K/M/G suffix (case-insensitive, powers of 1024).

/// Parse a `MAXSIZE` argument into a byte count.
///
/// Overflow of the multiplied value, a zero size, and unknown suffixes
/// are all rejected with a human-readable message.
pub fn parse_size(raw: &str) -> Result<u64, String> {
    let (digits, suffix) = match raw.find(|c: char| !c.is_ascii_digit()) {
        Some(pos) => raw.split_at(pos),
        None => (raw, ""),
    };

    let base: u64 = digits
        .parse()
        .map_err(|_| format!("invalid MAXSIZE: {raw}"))?;

    let shift = match suffix {
        "" | "b" | "B" => 0,
        "k" | "K" => 10,
        "m" | "M" => 20,
        "g" | "G" => 30,
        _ => {
            return Err(format!(
                "MAXSIZE must be informed in B (default), K, M, or G: {raw}"
            ));
        }
    };

    let size = base
        .checked_shl(shift)
        .filter(|&s| s >> shift == base)
        .ok_or_else(|| format!("MAXSIZE too large: {raw}"))?;
    if size == 0 {
        return Err("MAXSIZE must be greater than zero".to_owned());
    }
    Ok(size)
}
