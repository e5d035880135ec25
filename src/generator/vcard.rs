//! vCard 4.0 (RFC 6350) generation for teacher contact cards.

use crate::models::TeacherContact;
use chrono::Utc;
use regex::Regex;

/// Escape a vCard property value: backslash, semicolon, comma, newline
fn escape_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// Fold a content line to 75 octets max; continuation lines start with a
/// single space (RFC 6350 §3.2)
fn fold_line(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= 75 {
        return line.to_string();
    }

    let mut folded = Vec::new();
    folded.push(chars[..75].iter().collect::<String>());
    let mut rest = &chars[75..];
    while !rest.is_empty() {
        let take = rest.len().min(74);
        folded.push(format!(" {}", rest[..take].iter().collect::<String>()));
        rest = &rest[take..];
    }
    folded.join("\r\n")
}

pub fn validate_email(email: &str) -> bool {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    re.is_match(email)
}

pub fn validate_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let re = Regex::new(
        r"^\+?\(?[0-9]{1,4}\)?[-\s.]?\(?[0-9]{1,4}\)?[-\s.]?[0-9]{1,9}$",
    )
    .unwrap();
    re.is_match(&compact)
}

/// Outcome of contact validation; `errors` is empty when `valid`.
#[derive(Debug, Clone)]
pub struct VCardValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Validate teacher data before generation. First and last name are
/// required; email and phone are validated only when present.
pub fn validate_contact(contact: &TeacherContact) -> VCardValidation {
    let mut errors = Vec::new();

    if contact.last_name.trim().is_empty() {
        errors.push("The teacher's last name is required.".to_string());
    }
    if contact.first_name.trim().is_empty() {
        errors.push("The teacher's first name is required.".to_string());
    }
    if let Some(email) = &contact.email {
        if !validate_email(email) {
            errors.push(
                "The email address is not valid. Use a standard format (e.g. name@domain.se)."
                    .to_string(),
            );
        }
    }
    if let Some(phone) = &contact.phone {
        if !validate_phone(phone) {
            errors.push(
                "The phone number is not valid. Use a standard format (e.g. +46 123 456 789)."
                    .to_string(),
            );
        }
    }

    VCardValidation {
        valid: errors.is_empty(),
        errors,
    }
}

/// Render a vCard 4.0 for a teacher contact. CRLF line endings, folded to
/// 75 columns. Returns the validation errors when the contact is invalid.
pub fn generate_vcard_content(contact: &TeacherContact) -> Result<String, Vec<String>> {
    let validation = validate_contact(contact);
    if !validation.valid {
        return Err(validation.errors);
    }

    let mut lines = Vec::new();
    lines.push("BEGIN:VCARD".to_string());
    lines.push("VERSION:4.0".to_string());

    let formatted_name = format!("{} {}", contact.first_name, contact.last_name);
    lines.push(format!("FN:{}", escape_value(&formatted_name)));
    lines.push(format!(
        "N:{};{};;;",
        escape_value(&contact.last_name),
        escape_value(&contact.first_name)
    ));

    if let Some(email) = &contact.email {
        lines.push(format!("EMAIL;TYPE=work:{}", email));
    }
    if let Some(phone) = &contact.phone {
        lines.push(format!("TEL;TYPE=work,voice:{}", phone));
    }
    if let Some(mobile) = &contact.mobile {
        lines.push(format!("TEL;TYPE=cell:{}", mobile));
    }
    if let Some(org) = &contact.organization {
        match &contact.department {
            Some(dept) => lines.push(format!(
                "ORG:{};{}",
                escape_value(org),
                escape_value(dept)
            )),
            None => lines.push(format!("ORG:{}", escape_value(org))),
        }
    }
    if let Some(title) = &contact.title {
        lines.push(format!("TITLE:{}", escape_value(title)));
    }
    if let Some(role) = &contact.role {
        lines.push(format!("ROLE:{}", escape_value(role)));
    }
    if contact.city.is_some() || contact.country.is_some() {
        lines.push(format!(
            "ADR;TYPE=work:;;;{};;;{}",
            escape_value(contact.city.as_deref().unwrap_or("")),
            escape_value(contact.country.as_deref().unwrap_or(""))
        ));
    }
    if let Some(note) = &contact.note {
        lines.push(format!("NOTE:{}", escape_value(note)));
    }

    lines.push(format!("REV:{}", Utc::now().format("%Y%m%dT%H%M%SZ")));
    lines.push("PRODID:-//SRYEM//GIFT CLI VCard Generator//EN".to_string());
    lines.push("END:VCARD".to_string());

    let folded: Vec<String> = lines.iter().map(|l| fold_line(l)).collect();
    Ok(format!("{}\r\n", folded.join("\r\n")))
}

/// Default vCard filename: `vcard_<first>_<last>.vcf`, ASCII-folded
pub fn default_vcard_filename(first_name: &str, last_name: &str) -> String {
    let raw = format!("{}_{}", first_name, last_name).to_lowercase();
    let mut sanitized = String::new();
    let mut last_was_sep = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            sanitized.push(c);
            last_was_sep = false;
        } else if !last_was_sep && !sanitized.is_empty() {
            sanitized.push('_');
            last_was_sep = true;
        }
    }
    format!("vcard_{}.vcf", sanitized.trim_end_matches('_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher() -> TeacherContact {
        TeacherContact {
            first_name: "Marie".to_string(),
            last_name: "Dupont".to_string(),
            email: Some("marie.dupont@example.se".to_string()),
            phone: Some("+46 123 456 789".to_string()),
            organization: Some("SRYEM".to_string()),
            title: Some("Teacher".to_string()),
            ..TeacherContact::default()
        }
    }

    #[test]
    fn test_generate_basic_vcard() {
        let content = generate_vcard_content(&teacher()).unwrap();
        assert!(content.starts_with("BEGIN:VCARD\r\nVERSION:4.0\r\n"));
        assert!(content.contains("FN:Marie Dupont\r\n"));
        assert!(content.contains("N:Dupont;Marie;;;\r\n"));
        assert!(content.contains("EMAIL;TYPE=work:marie.dupont@example.se"));
        assert!(content.ends_with("END:VCARD\r\n"));
    }

    #[test]
    fn test_missing_names_rejected() {
        let contact = TeacherContact::default();
        let errors = generate_vcard_content(&contact).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut contact = teacher();
        contact.email = Some("not-an-email".to_string());
        let validation = validate_contact(&contact);
        assert!(!validation.valid);
        assert!(validation.errors[0].contains("email"));
    }

    #[test]
    fn test_phone_formats() {
        assert!(validate_phone("+46123456789"));
        assert!(validate_phone("+46 123 456 789"));
        assert!(validate_phone("0123456789"));
        assert!(!validate_phone("call me"));
    }

    #[test]
    fn test_value_escaping() {
        let mut contact = teacher();
        contact.organization = Some("Dept; of Ed, North".to_string());
        let content = generate_vcard_content(&contact).unwrap();
        assert!(content.contains(r"ORG:Dept\; of Ed\, North"));
    }

    #[test]
    fn test_line_folding() {
        let mut contact = teacher();
        contact.note = Some("x".repeat(200));
        let content = generate_vcard_content(&contact).unwrap();
        for line in content.split("\r\n") {
            assert!(line.chars().count() <= 75, "line too long: {}", line);
        }
        // The folded note reassembles to the original
        let unfolded = content.replace("\r\n ", "");
        assert!(unfolded.contains(&"x".repeat(200)));
    }

    #[test]
    fn test_default_filename_folds_non_ascii() {
        assert_eq!(
            default_vcard_filename("Marie", "Dupont"),
            "vcard_marie_dupont.vcf"
        );
        assert_eq!(
            default_vcard_filename("Héloïse", "Brontë"),
            "vcard_h_lo_se_bront.vcf"
        );
    }
}
