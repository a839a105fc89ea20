use serde::{Deserialize, Serialize};

/// Sort key of one row.
///
/// `dictionary` holds every dictionary-encoded dimension packed at its fixed
/// width, `no_dictionary` holds one raw value per no-dictionary dimension in
/// declaration order. `complex` payloads ride along but never take part in
/// ordering.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompositeKey {
    pub dictionary: Vec<u8>,
    #[serde(default)]
    pub no_dictionary: Vec<Vec<u8>>,
    #[serde(default)]
    pub complex: Vec<Vec<u8>>,
}

impl CompositeKey {
    pub fn new(dictionary: Vec<u8>, no_dictionary: Vec<Vec<u8>>) -> Self {
        Self {
            dictionary,
            no_dictionary,
            complex: Vec::new(),
        }
    }

    pub fn with_complex(mut self, complex: Vec<Vec<u8>>) -> Self {
        self.complex = complex;
        self
    }

    pub fn no_dictionary_at(&self, index: usize) -> Option<&[u8]> {
        self.no_dictionary.get(index).map(Vec::as_slice)
    }
}
