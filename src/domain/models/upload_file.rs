use bytes::Bytes;

/// An incoming file as received from a client
#[derive(Debug, Clone, bon::Builder)]
pub struct UploadFile {
    #[builder(into)]
    pub file_name: Option<String>,
    #[builder(into)]
    pub content_type: Option<String>,
    #[builder(into)]
    pub data: Bytes,
}

impl UploadFile {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Extension of the original file name: the text after the last '.'
    pub fn extension(&self) -> Option<&str> {
        self.file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext)
    }
}
