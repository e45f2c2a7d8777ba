/*!
Simulation configuration.

A [`Config`] can only be obtained through [`ConfigBuilder::build`], which
validates every parameter up front. Once built the configuration is immutable
and can be shared freely between independent simulations.

# Examples

```
use pagesim::config::{AccessPattern, Algorithm, ConfigBuilder};

let config = ConfigBuilder::new()
    .page_size(10)
    .frame_count(4)
    .total_instructions(320)
    .algorithm(Algorithm::Lru)
    .access_pattern(AccessPattern::Branch)
    .sequence_length(200)
    .build()
    .unwrap();

assert_eq!(config.page_count(), 32);
```
*/

use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::error::{Error, ErrorKind, ErrorOrigin, Result};

#[cfg(feature = "serde_derive")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_FRAME_COUNT: usize = 5;
pub const DEFAULT_TOTAL_INSTRUCTIONS: usize = 2400;
pub const DEFAULT_SEQUENCE_LENGTH: usize = 1000;
pub const DEFAULT_LOCALITY_FACTOR: f64 = 0.8;

/// The eviction policy used when a fault occurs on a full frame table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde_derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_derive", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    #[default]
    Fifo,
    Lru,
    Opt,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Fifo, Algorithm::Lru, Algorithm::Opt];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Fifo => "fifo",
            Algorithm::Lru => "lru",
            Algorithm::Opt => "opt",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fifo" => Ok(Algorithm::Fifo),
            "lru" => Ok(Algorithm::Lru),
            "opt" => Ok(Algorithm::Opt),
            _ => Err(Error(ErrorOrigin::Config, ErrorKind::UnknownAlgorithm).log_debug(s)),
        }
    }
}

/// The access pattern model the workload generator uses.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum AccessPattern {
    Sequential,
    Jump,
    Branch,
    #[default]
    Loop,
    LocalityRandom,
}

impl AccessPattern {
    pub const ALL: [AccessPattern; 5] = [
        AccessPattern::Sequential,
        AccessPattern::Jump,
        AccessPattern::Branch,
        AccessPattern::Loop,
        AccessPattern::LocalityRandom,
    ];

    /// Resolves the numeric mode (0 to 4) of an access pattern.
    pub fn from_index(index: u32) -> Result<Self> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| Error(ErrorOrigin::Config, ErrorKind::UnknownAccessPattern))
    }

    pub fn index(self) -> u32 {
        match self {
            AccessPattern::Sequential => 0,
            AccessPattern::Jump => 1,
            AccessPattern::Branch => 2,
            AccessPattern::Loop => 3,
            AccessPattern::LocalityRandom => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessPattern::Sequential => "sequential",
            AccessPattern::Jump => "jump",
            AccessPattern::Branch => "branch",
            AccessPattern::Loop => "loop",
            AccessPattern::LocalityRandom => "locality random",
        }
    }
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated simulation configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    page_size: usize,
    frame_count: usize,
    total_instructions: usize,
    algorithm: Algorithm,
    access_pattern: AccessPattern,
    locality_factor: f64,
    sequence_length: usize,
}

impl Config {
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn total_instructions(&self) -> usize {
        self.total_instructions
    }

    pub fn page_count(&self) -> usize {
        self.total_instructions / self.page_size
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn access_pattern(&self) -> AccessPattern {
        self.access_pattern
    }

    pub fn locality_factor(&self) -> f64 {
        self.locality_factor
    }

    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    /// Returns a copy of this config running a different algorithm.
    pub fn with_algorithm(&self, algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..self.clone()
        }
    }

    /// Returns a copy of this config with a different frame count.
    pub fn with_frame_count(&self, frame_count: usize) -> Result<Self> {
        if frame_count == 0 {
            return Err(Error(ErrorOrigin::Config, ErrorKind::InvalidFrameCount));
        }
        Ok(Self {
            frame_count,
            ..self.clone()
        })
    }

    /// Converts the config back into a builder, e.g. to override single values.
    pub fn to_builder(&self) -> ConfigBuilder {
        ConfigBuilder {
            page_size: self.page_size,
            frame_count: self.frame_count,
            total_instructions: self.total_instructions,
            algorithm: self.algorithm,
            access_pattern: self.access_pattern,
            locality_factor: self.locality_factor,
            sequence_length: self.sequence_length,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            frame_count: DEFAULT_FRAME_COUNT,
            total_instructions: DEFAULT_TOTAL_INSTRUCTIONS,
            algorithm: Algorithm::default(),
            access_pattern: AccessPattern::default(),
            locality_factor: DEFAULT_LOCALITY_FACTOR,
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "page size: {} instructions", self.page_size)?;
        writeln!(f, "frames: {}", self.frame_count)?;
        writeln!(f, "pages: {}", self.page_count())?;
        writeln!(f, "total instructions: {}", self.total_instructions)?;
        writeln!(f, "sequence length: {}", self.sequence_length)?;
        writeln!(f, "locality factor: {:.2}", self.locality_factor)?;
        writeln!(f, "algorithm: {}", self.algorithm)?;
        write!(
            f,
            "access pattern: {} ({})",
            self.access_pattern.index(),
            self.access_pattern
        )
    }
}

/// Builder for a [`Config`]. Unset values keep their defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigBuilder {
    page_size: usize,
    frame_count: usize,
    total_instructions: usize,
    algorithm: Algorithm,
    access_pattern: AccessPattern,
    locality_factor: f64,
    sequence_length: usize,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Config::default().to_builder()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn frame_count(mut self, frame_count: usize) -> Self {
        self.frame_count = frame_count;
        self
    }

    pub fn total_instructions(mut self, total_instructions: usize) -> Self {
        self.total_instructions = total_instructions;
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn access_pattern(mut self, access_pattern: AccessPattern) -> Self {
        self.access_pattern = access_pattern;
        self
    }

    pub fn locality_factor(mut self, locality_factor: f64) -> Self {
        self.locality_factor = locality_factor;
        self
    }

    pub fn sequence_length(mut self, sequence_length: usize) -> Self {
        self.sequence_length = sequence_length;
        self
    }

    /// Validates all parameters and produces the final [`Config`].
    ///
    /// A sequence length larger than the instruction count is clamped.
    pub fn build(self) -> Result<Config> {
        if self.page_size == 0 {
            return Err(Error(ErrorOrigin::Config, ErrorKind::InvalidPageSize));
        }
        if self.frame_count == 0 {
            return Err(Error(ErrorOrigin::Config, ErrorKind::InvalidFrameCount));
        }
        if self.total_instructions == 0 {
            return Err(Error(ErrorOrigin::Config, ErrorKind::InvalidInstructionCount));
        }
        if self.total_instructions % self.page_size != 0 {
            return Err(Error(ErrorOrigin::Config, ErrorKind::NotPageMultiple).log_debug(
                format!("{} % {}", self.total_instructions, self.page_size),
            ));
        }
        if !(0.0..=1.0).contains(&self.locality_factor) {
            return Err(Error(ErrorOrigin::Config, ErrorKind::InvalidLocalityFactor));
        }
        if self.sequence_length == 0 {
            return Err(Error(ErrorOrigin::Config, ErrorKind::InvalidSequenceLength));
        }

        let sequence_length = if self.sequence_length > self.total_instructions {
            warn!(
                "sequence length {} exceeds the instruction count, clamping to {}",
                self.sequence_length, self.total_instructions
            );
            self.total_instructions
        } else {
            self.sequence_length
        };

        Ok(Config {
            page_size: self.page_size,
            frame_count: self.frame_count,
            total_instructions: self.total_instructions,
            algorithm: self.algorithm,
            access_pattern: self.access_pattern,
            locality_factor: self.locality_factor,
            sequence_length,
        })
    }
}

/// On-disk representation of a configuration. Every value is optional.
///
/// ```toml
/// page_size = 10
/// frames = 5
/// algorithm = "lru"
/// access_pattern = 4
/// locality_factor = 0.9
/// ```
#[cfg(feature = "configfiles")]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub page_size: Option<usize>,
    pub frames: Option<usize>,
    pub total_instructions: Option<usize>,
    pub algorithm: Option<Algorithm>,
    pub access_pattern: Option<u32>,
    pub locality_factor: Option<f64>,
    pub sequence_length: Option<usize>,
}

#[cfg(feature = "configfiles")]
impl ConfigFile {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input)
            .map_err(|err| Error(ErrorOrigin::ConfigFile, ErrorKind::Encoding).log_error(err))
    }

    /// Applies all values present in the file on top of the given builder.
    pub fn apply(&self, mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
        if let Some(page_size) = self.page_size {
            builder = builder.page_size(page_size);
        }
        if let Some(frames) = self.frames {
            builder = builder.frame_count(frames);
        }
        if let Some(total) = self.total_instructions {
            builder = builder.total_instructions(total);
        }
        if let Some(algorithm) = self.algorithm {
            builder = builder.algorithm(algorithm);
        }
        if let Some(pattern) = self.access_pattern {
            builder = builder.access_pattern(AccessPattern::from_index(pattern)?);
        }
        if let Some(locality) = self.locality_factor {
            builder = builder.locality_factor(locality);
        }
        if let Some(len) = self.sequence_length {
            builder = builder.sequence_length(len);
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page_count(), 240);
        assert_eq!(config.access_pattern(), AccessPattern::Loop);
        assert_eq!(config.algorithm(), Algorithm::Fifo);
    }

    #[test]
    fn rejects_non_multiple_instruction_count() {
        let err = ConfigBuilder::new()
            .total_instructions(100)
            .page_size(7)
            .build()
            .unwrap_err();
        assert_eq!(err, Error(ErrorOrigin::Config, ErrorKind::NotPageMultiple));
        assert!(err.is_config_error());
    }

    #[test]
    fn rejects_zero_values() {
        let zero_page = ConfigBuilder::new().page_size(0).build().unwrap_err();
        assert_eq!(zero_page.1, ErrorKind::InvalidPageSize);

        let zero_frames = ConfigBuilder::new().frame_count(0).build().unwrap_err();
        assert_eq!(zero_frames.1, ErrorKind::InvalidFrameCount);

        let zero_total = ConfigBuilder::new().total_instructions(0).build().unwrap_err();
        assert_eq!(zero_total.1, ErrorKind::InvalidInstructionCount);

        let zero_len = ConfigBuilder::new().sequence_length(0).build().unwrap_err();
        assert_eq!(zero_len.1, ErrorKind::InvalidSequenceLength);
    }

    #[test]
    fn rejects_locality_out_of_range() {
        for factor in &[-0.1, 1.01, f64::NAN] {
            let err = ConfigBuilder::new()
                .locality_factor(*factor)
                .build()
                .unwrap_err();
            assert_eq!(err.1, ErrorKind::InvalidLocalityFactor);
        }

        assert!(ConfigBuilder::new().locality_factor(0.0).build().is_ok());
        assert!(ConfigBuilder::new().locality_factor(1.0).build().is_ok());
    }

    #[test]
    fn clamps_sequence_length() {
        let config = ConfigBuilder::new()
            .total_instructions(100)
            .sequence_length(500)
            .build()
            .unwrap();
        assert_eq!(config.sequence_length(), 100);
    }

    #[test]
    fn parse_algorithm() {
        assert_eq!("fifo".parse::<Algorithm>().unwrap(), Algorithm::Fifo);
        assert_eq!("LRU".parse::<Algorithm>().unwrap(), Algorithm::Lru);
        assert_eq!("opt".parse::<Algorithm>().unwrap(), Algorithm::Opt);

        let err = "clock".parse::<Algorithm>().unwrap_err();
        assert_eq!(err.1, ErrorKind::UnknownAlgorithm);
    }

    #[test]
    fn access_pattern_indices() {
        for (i, pattern) in AccessPattern::ALL.iter().enumerate() {
            assert_eq!(AccessPattern::from_index(i as u32).unwrap(), *pattern);
            assert_eq!(pattern.index(), i as u32);
        }

        let err = AccessPattern::from_index(5).unwrap_err();
        assert_eq!(err.1, ErrorKind::UnknownAccessPattern);
    }

    #[test]
    fn with_frame_count_rejects_zero() {
        let config = Config::default();
        assert_eq!(config.with_frame_count(8).unwrap().frame_count(), 8);
        assert!(config.with_frame_count(0).is_err());
    }

    #[cfg(feature = "configfiles")]
    #[test]
    fn config_file_overrides_defaults() {
        let file = ConfigFile::from_toml_str(
            r#"
            page_size = 4
            frames = 3
            total_instructions = 64
            algorithm = "opt"
            access_pattern = 4
            locality_factor = 0.5
            "#,
        )
        .unwrap();

        let config = file.apply(ConfigBuilder::new()).unwrap().build().unwrap();
        assert_eq!(config.page_size(), 4);
        assert_eq!(config.frame_count(), 3);
        assert_eq!(config.algorithm(), Algorithm::Opt);
        assert_eq!(config.access_pattern(), AccessPattern::LocalityRandom);
        // clamped from the default of 1000
        assert_eq!(config.sequence_length(), 64);
    }

    #[cfg(feature = "configfiles")]
    #[test]
    fn config_file_rejects_unknown_values() {
        assert_eq!(
            ConfigFile::from_toml_str("pages = 3").unwrap_err().1,
            ErrorKind::Encoding
        );

        assert_eq!(
            ConfigFile::from_toml_str("algorithm = \"clock\"")
                .unwrap_err()
                .1,
            ErrorKind::Encoding
        );

        let err = ConfigFile::from_toml_str("access_pattern = 7")
            .unwrap()
            .apply(ConfigBuilder::new())
            .unwrap_err();
        assert_eq!(err.1, ErrorKind::UnknownAccessPattern);
    }
}
