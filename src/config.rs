use std::env;
use std::str::FromStr;

/// How decoded frames are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable summary lines through the logger
    #[default]
    Text,
    /// One JSON object per frame on stdout
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Invalid OUTPUT_FORMAT '{}', expected 'text' or 'json'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    pub output: OutputFormat,
    /// Device id given to frames passed as bare hex
    pub device_id: Option<String>,
    /// Exit with an error when any frame fails to decode
    pub strict: bool,
}

impl DecoderConfig {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        // Load environment variables
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let output = match lookup("OUTPUT_FORMAT") {
            Some(value) => value.parse::<OutputFormat>()?,
            None => OutputFormat::default(),
        };

        let device_id = lookup("SIGFOX_DEVICE_ID")
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let strict = match lookup("STRICT") {
            Some(value) => parse_flag(&value)
                .ok_or_else(|| format!("Invalid STRICT '{}', expected true or false", value))?,
            None => false,
        };

        Ok(DecoderConfig {
            output,
            device_id,
            strict,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
