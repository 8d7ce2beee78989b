//! Traditional-to-Simplified conversion capability

use std::fmt;

use crate::core::errors::Result;

/// Maps a span of Traditional-Chinese text to Simplified Chinese.
///
/// Implementations are shared across documents (and tasks, when the batch
/// runs with more than one job), so they must be safe to call concurrently.
pub trait Converter: Send + Sync {
    fn convert(&self, text: &str) -> Result<String>;
}

/// Converter backed by the `zhconv` tables, targeting `zh-Hans`
#[derive(Clone, Copy, Default)]
pub struct ZhconvConverter;

impl ZhconvConverter {
    pub fn new() -> Self {
        Self
    }
}

impl fmt::Debug for ZhconvConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ZhconvConverter(zh-Hans)")
    }
}

impl Converter for ZhconvConverter {
    fn convert(&self, text: &str) -> Result<String> {
        Ok(zhconv::zhconv(text, zhconv::Variant::ZhHans))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Deterministic converters for unit tests

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::Converter;
    use crate::core::errors::{ConversionError, Result};

    /// Per-character table converter that records every input it sees
    #[derive(Default)]
    pub struct TableConverter {
        table: HashMap<char, char>,
        calls: Mutex<Vec<String>>,
    }

    impl TableConverter {
        pub fn new() -> Self {
            let table = [
                ('這', '这'),
                ('確', '确'),
                ('碼', '码'),
                ('體', '体'),
                ('簡', '简'),
                ('檔', '档'),
                ('連', '连'),
                ('結', '结'),
            ]
            .into_iter()
            .collect();
            Self {
                table,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Converter for TableConverter {
        fn convert(&self, text: &str) -> Result<String> {
            self.calls.lock().unwrap().push(text.to_string());
            Ok(text
                .chars()
                .map(|c| *self.table.get(&c).unwrap_or(&c))
                .collect())
        }
    }

    /// Converter that always fails
    pub struct FailingConverter;

    impl Converter for FailingConverter {
        fn convert(&self, _text: &str) -> Result<String> {
            Err(ConversionError::ConverterError {
                message: "conversion table unavailable".to_string(),
            })
        }
    }
}
