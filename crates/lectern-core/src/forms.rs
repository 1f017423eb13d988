//! Form state for the upload and registration flows.
//!
//! The UX contract: only a *successful* submission clears a form. On any
//! failure every field is left intact, including the selected file, so the
//! user can retry without re-entering data. The policy is applied uniformly
//! to both the create and edit flows.

/// A file selected on the client, ready for multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// State of the "upload a book" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author_id: String,
    pub category_id: String,
    pub description: String,
    pub image_url: String,
    pub file: Option<FileAttachment>,
}

impl BookForm {
    /// Clears every field, including the selected file.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// State of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_every_field_including_file() {
        let mut form = BookForm {
            title: "Dune".to_string(),
            author_id: "a1".to_string(),
            category_id: "c1".to_string(),
            description: "sand".to_string(),
            image_url: "http://img".to_string(),
            file: Some(FileAttachment::new("dune.pdf", vec![1, 2, 3])),
        };
        form.clear();
        assert!(form.is_empty());
        assert!(form.file.is_none());
    }
}
