//! Two-stage conversion through a binary intermediate
//!
//! Stage one turns the input into bytes (hex decode, or text encode in the
//! source encoding); stage two renders those bytes in the target encoding.
//! Every outcome, including failure, is a string that can be shown in place
//! of the converted text.

use serde::Serialize;

use crate::codec::{Substitution, codec_for};
use crate::{EncodingType, Error, Result, hex};

/// Output shown when the source text is not valid in its declared encoding
pub const SOURCE_ERROR_TEXT: &str = "[Conversion error - invalid input format]";

/// Output shown when the bytes cannot be rendered in the target encoding
pub const TARGET_ERROR_TEXT: &str = "[Conversion error]";

/// How a conversion arrived at its output
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionStatus {
    /// Input was empty, or held no bytes
    Empty,
    /// Both stages succeeded
    Converted,
    /// Hex input was malformed; output is the partial recovery rendering
    Recovered,
    /// The source stage failed; output is [`SOURCE_ERROR_TEXT`]
    SourceInvalid(Error),
    /// The target stage failed; output is [`TARGET_ERROR_TEXT`]
    TargetInvalid(Error),
}

impl ConversionStatus {
    /// Short machine-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ConversionStatus::Empty => "empty",
            ConversionStatus::Converted => "converted",
            ConversionStatus::Recovered => "recovered",
            ConversionStatus::SourceInvalid(_) => "source-invalid",
            ConversionStatus::TargetInvalid(_) => "target-invalid",
        }
    }

    /// The underlying error, if a stage failed
    pub fn error(&self) -> Option<&Error> {
        match self {
            ConversionStatus::SourceInvalid(err) | ConversionStatus::TargetInvalid(err) => Some(err),
            _ => None,
        }
    }
}

/// Renderable result of one conversion
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Text to display in the target buffer
    pub output: String,
    /// Byte length of `output`
    pub length: usize,
    /// How the output was produced
    pub status: ConversionStatus,
}

impl Conversion {
    fn new(output: String, status: ConversionStatus) -> Self {
        Self {
            length: output.len(),
            output,
            status,
        }
    }

    fn empty() -> Self {
        Self::new(String::new(), ConversionStatus::Empty)
    }

    /// Whether both stages succeeded
    pub fn is_converted(&self) -> bool {
        self.status == ConversionStatus::Converted
    }
}

#[derive(Serialize)]
struct ConversionRecord<'a> {
    output: &'a str,
    length: usize,
    status: &'static str,
    error: Option<String>,
}

impl Serialize for Conversion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ConversionRecord {
            output: &self.output,
            length: self.length,
            status: self.status.label(),
            error: self.status.error().map(ToString::to_string),
        }
        .serialize(serializer)
    }
}

/// Converter between any two [`EncodingType`]s
///
/// Holds no state besides its policy, so one instance can serve any number
/// of calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transcoder {
    policy: Substitution,
}

impl Transcoder {
    /// Create a transcoder that substitutes undecodable units
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose what happens to units the target encoding cannot decode
    pub fn with_substitution(mut self, policy: Substitution) -> Self {
        self.policy = policy;
        self
    }

    /// Current substitution policy
    pub fn substitution(&self) -> Substitution {
        self.policy
    }

    /// Convert `input` from `from` to `to`
    pub fn convert(&self, input: impl AsRef<[u8]>, from: EncodingType, to: EncodingType) -> Conversion {
        let input = input.as_ref();
        if input.is_empty() {
            return Conversion::empty();
        }

        let binary = match self.binary_of(input, from) {
            Ok(binary) => binary,
            Err(Error::MalformedHex(fault)) => {
                log::debug!("hex input malformed ({}), rendering partial recovery", fault);
                return Conversion::new(hex::recover_partial(input), ConversionStatus::Recovered);
            }
            Err(err) => {
                log::debug!("source stage failed for {}: {}", from, err);
                return Conversion::new(
                    SOURCE_ERROR_TEXT.to_string(),
                    ConversionStatus::SourceInvalid(err),
                );
            }
        };

        if binary.is_empty() {
            return Conversion::empty();
        }

        match self.render(&binary, to) {
            Ok(output) => {
                log::trace!(
                    "{} -> {}: {} input bytes, {} intermediate, {} output",
                    from,
                    to,
                    input.len(),
                    binary.len(),
                    output.len()
                );
                Conversion::new(output, ConversionStatus::Converted)
            }
            Err(err) => {
                log::debug!("target stage failed for {}: {}", to, err);
                Conversion::new(
                    TARGET_ERROR_TEXT.to_string(),
                    ConversionStatus::TargetInvalid(err),
                )
            }
        }
    }

    /// Stage one: materialize the bytes `input` stands for
    pub fn binary_of(&self, input: &[u8], from: EncodingType) -> Result<Vec<u8>> {
        match codec_for(from) {
            Some(codec) => codec.encode(input),
            None => hex::decode(input),
        }
    }

    /// Stage two: render bytes in the target encoding
    pub fn render(&self, binary: &[u8], to: EncodingType) -> Result<String> {
        match codec_for(to) {
            Some(codec) => codec.decode(binary, self.policy),
            None => Ok(hex::encode(binary)),
        }
    }
}

/// Convert with the default (substituting) [`Transcoder`]
pub fn convert(input: impl AsRef<[u8]>, from: EncodingType, to: EncodingType) -> Conversion {
    Transcoder::new().convert(input, from, to)
}
