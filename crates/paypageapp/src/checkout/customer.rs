//! Customer field helpers: input masks for documents and phones, and the
//! name/e-mail checks the form runs before enabling payment.

use once_cell::sync::Lazy;
use regex::Regex;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| re(r"\D"));
static GROUP_3_THEN_DIGIT: Lazy<Regex> = Lazy::new(|| re(r"(\d{3})(\d)"));
static GROUP_2_THEN_DIGIT: Lazy<Regex> = Lazy::new(|| re(r"(\d{2})(\d)"));
static CPF_CHECK: Lazy<Regex> = Lazy::new(|| re(r"(\d{3})(\d{1,2})"));
static CNPJ_CHECK: Lazy<Regex> = Lazy::new(|| re(r"(\d{4})(\d{1,2})"));
static BR_PHONE_TAIL: Lazy<Regex> = Lazy::new(|| re(r"(\d{5})(\d{1,4})"));
static EMAIL: Lazy<Regex> = Lazy::new(|| re(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

fn digits(value: &str) -> String {
    NON_DIGIT.replace_all(value, "").into_owned()
}

/// Masks a CPF (up to 11 digits, `000.000.000-00`) or a CNPJ
/// (`00.000.000/0000-00`). Partial input is masked as far as it goes.
pub fn format_document(value: &str) -> String {
    let numbers = digits(value);
    if numbers.len() <= 11 {
        let s = GROUP_3_THEN_DIGIT.replace(&numbers, "${1}.${2}");
        let s = GROUP_3_THEN_DIGIT.replace(&s, "${1}.${2}");
        CPF_CHECK.replace(&s, "${1}-${2}").into_owned()
    } else {
        let s = GROUP_2_THEN_DIGIT.replace(&numbers, "${1}.${2}");
        let s = GROUP_3_THEN_DIGIT.replace(&s, "${1}.${2}");
        let s = GROUP_3_THEN_DIGIT.replace(&s, "${1}/${2}");
        CNPJ_CHECK.replace(&s, "${1}-${2}").into_owned()
    }
}

/// Brazilian numbers get `(00) 00000-0000`; everything else is digits only.
pub fn format_phone(value: &str, country_code: &str) -> String {
    let numbers = digits(value);
    if country_code != "BR" {
        return numbers;
    }
    let s = GROUP_2_THEN_DIGIT.replace(&numbers, "(${1}) ${2}");
    BR_PHONE_TAIL.replace(&s, "${1}-${2}").into_owned()
}

/// At least two words separated by single spaces.
pub fn is_valid_name(name: &str) -> bool {
    let words: Vec<&str> = name.trim().split(' ').collect();
    words.len() >= 2 && words.iter().all(|w| !w.is_empty())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_cpf() {
        assert_eq!(format_document("12345678901"), "123.456.789-01");
        assert_eq!(format_document("123.456.789-01"), "123.456.789-01");
    }

    #[test]
    fn formats_partial_cpf() {
        assert_eq!(format_document("1234"), "123.4");
        assert_eq!(format_document("1234567"), "123.456.7");
        assert_eq!(format_document(""), "");
    }

    #[test]
    fn formats_cnpj() {
        assert_eq!(format_document("12345678000195"), "12.345.678/0001-95");
    }

    #[test]
    fn formats_brazilian_phone() {
        assert_eq!(format_phone("11987654321", "BR"), "(11) 98765-4321");
        assert_eq!(format_phone("119", "BR"), "(11) 9");
    }

    #[test]
    fn other_phones_keep_digits_only() {
        assert_eq!(format_phone("+1 (555) 010-9999", "US"), "15550109999");
    }

    #[test]
    fn names_need_two_words() {
        assert!(is_valid_name("Maria Silva"));
        assert!(is_valid_name("  Ana Maria Souza "));
        assert!(!is_valid_name("Maria"));
        assert!(!is_valid_name("Maria  Silva"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn checks_email_shape() {
        assert!(is_valid_email("cliente@loja.com.br"));
        assert!(!is_valid_email("cliente@loja"));
        assert!(!is_valid_email("cli ente@loja.com"));
        assert!(!is_valid_email("@loja.com"));
    }
}
