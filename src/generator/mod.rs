pub mod gift;
pub mod vcard;

pub use gift::{
    default_filename, escape_gift, generate_gift_content, generate_validated, preview_gift,
    GiftPreview,
};
pub use vcard::{
    default_vcard_filename, generate_vcard_content, validate_contact, VCardValidation,
};
