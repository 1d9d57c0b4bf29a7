const COUNTRY_CODE: &str = "+91";

/// Reduces a shopper-typed phone number to its 10 national digits.
pub fn national_digits(raw: &str) -> Option<String> {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    let digits = digits
        .strip_prefix(COUNTRY_CODE)
        .or_else(|| (digits.len() == 12).then(|| digits.strip_prefix("91")).flatten())
        .or_else(|| (digits.len() == 11).then(|| digits.strip_prefix('0')).flatten())
        .unwrap_or(&digits);

    (digits.len() == 10 && digits.chars().all(|c| c.is_ascii_digit())).then(|| digits.to_string())
}

/// E.164 form expected by the identity provider.
pub fn to_e164(raw: &str) -> Option<String> {
    national_digits(raw).map(|digits| format!("{}{}", COUNTRY_CODE, digits))
}
