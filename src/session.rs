//! Two linked buffers kept in sync as either side is edited

use crate::{Conversion, EncodingType, Metrics, Transcoder, count};

/// A pair of buffers, each declared in its own encoding
///
/// Editing one side re-derives the other through the [`Transcoder`].
#[derive(Debug, Clone)]
pub struct Session {
    transcoder: Transcoder,
    top: String,
    bottom: String,
    top_encoding: EncodingType,
    bottom_encoding: EncodingType,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EncodingType::Hex, EncodingType::ASCII)
    }
}

impl Session {
    /// Empty session with the given encodings
    pub fn new(top_encoding: EncodingType, bottom_encoding: EncodingType) -> Self {
        Self {
            transcoder: Transcoder::new(),
            top: String::new(),
            bottom: String::new(),
            top_encoding,
            bottom_encoding,
        }
    }

    /// Use a specific transcoder for every update
    pub fn with_transcoder(mut self, transcoder: Transcoder) -> Self {
        self.transcoder = transcoder;
        self
    }

    /// Top buffer contents
    pub fn top(&self) -> &str {
        &self.top
    }

    /// Bottom buffer contents
    pub fn bottom(&self) -> &str {
        &self.bottom
    }

    /// Encodings of the top and bottom buffers
    pub fn encodings(&self) -> (EncodingType, EncodingType) {
        (self.top_encoding, self.bottom_encoding)
    }

    /// Replace the top buffer and re-derive the bottom one
    pub fn edit_top(&mut self, text: impl Into<String>) -> Conversion {
        self.top = text.into();
        self.sync_down()
    }

    /// Replace the bottom buffer and re-derive the top one
    pub fn edit_bottom(&mut self, text: impl Into<String>) -> Conversion {
        self.bottom = text.into();
        let conversion =
            self.transcoder
                .convert(&self.bottom, self.bottom_encoding, self.top_encoding);
        self.top.clone_from(&conversion.output);
        conversion
    }

    /// Change either encoding; the bottom buffer is re-derived from the top
    pub fn set_encodings(&mut self, top: EncodingType, bottom: EncodingType) -> Conversion {
        self.top_encoding = top;
        self.bottom_encoding = bottom;
        self.sync_down()
    }

    /// Exchange buffers and encodings, then re-derive the bottom buffer
    pub fn swap(&mut self) -> Conversion {
        std::mem::swap(&mut self.top, &mut self.bottom);
        std::mem::swap(&mut self.top_encoding, &mut self.bottom_encoding);
        self.sync_down()
    }

    /// Counters for the top and bottom buffers
    ///
    /// The top buffer is measured against the bottom encoding; the bottom
    /// buffer is always measured as raw text.
    pub fn counters(&self) -> (Metrics, Metrics) {
        (
            count(&self.top, self.top_encoding, self.bottom_encoding),
            Metrics::of_text(&self.bottom),
        )
    }

    fn sync_down(&mut self) -> Conversion {
        let conversion = self
            .transcoder
            .convert(&self.top, self.top_encoding, self.bottom_encoding);
        self.bottom.clone_from(&conversion.output);
        conversion
    }
}
