pub mod bank;
pub mod exam;
pub mod profile;
pub mod simulate;
pub mod transfer;
pub mod vcard;
