extern crate logger;
extern crate util;

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Error as IOError;
use std::path::Path;
use std::str::FromStr;

use logger::{Level, Logger};
use util::splitargs;

/// Number of levels a list gets when nothing else is configured.
pub const DEFAULT_MAX_LEVELS: usize = 33;

/// Settings used to build a skiplist.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Number of forward links in the head node, and therefore the tallest a node may be.
    pub max_levels: usize,
    /// Seed for the level generator. `None` seeds from the wall clock.
    pub seed: Option<u64>,
    pub loglevel: Level,
    /// Path of the log file. `None` logs to the standard output.
    pub logfile: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFormat,
    InvalidParameter,
    UnknownDirective(String),
    IOError(IOError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::InvalidFormat => f.write_str("invalid configuration line"),
            ConfigError::InvalidParameter => f.write_str("invalid configuration value"),
            ConfigError::UnknownDirective(ref name) => {
                write!(f, "unknown configuration directive {:?}", name)
            }
            ConfigError::IOError(ref e) => write!(f, "cannot read configuration: {}", e),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ConfigError::IOError(ref e) => Some(e),
            _ => None,
        }
    }
}

fn read_string(args: &[String]) -> Result<&str, ConfigError> {
    if args.len() != 2 {
        Err(ConfigError::InvalidFormat)
    } else {
        Ok(&*args[1])
    }
}

fn read_parse<T>(args: &[String]) -> Result<T, ConfigError>
where
    T: FromStr,
{
    match read_string(args)?.parse() {
        Ok(f) => Ok(f),
        Err(_) => Err(ConfigError::InvalidParameter),
    }
}

impl Config {
    pub fn new() -> Config {
        Config {
            max_levels: DEFAULT_MAX_LEVELS,
            seed: None,
            loglevel: Level::Notice,
            logfile: None,
        }
    }

    /// Reads directives from the file at `fname`, overriding the current settings.
    pub fn parsefile(&mut self, fname: &str) -> Result<(), ConfigError> {
        let path = Path::new(fname);
        let file = BufReader::new(File::open(&path)?);
        for line in file.lines() {
            self.parseline(&line?)?;
        }
        Ok(())
    }

    /// Reads directives from `text`, one per line, overriding the current settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use config::Config;
    ///
    /// let mut config = Config::new();
    /// config.parse("max-levels 12\nseed 7").unwrap();
    /// assert_eq!(config.max_levels, 12);
    /// assert_eq!(config.seed, Some(7));
    /// ```
    pub fn parse(&mut self, text: &str) -> Result<(), ConfigError> {
        for line in text.lines() {
            self.parseline(line)?;
        }
        Ok(())
    }

    fn parseline(&mut self, line: &str) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let args = match splitargs(line) {
            Some(args) => args,
            None => return Err(ConfigError::InvalidFormat),
        };
        match &*args[0] {
            "max-levels" => self.max_levels = read_parse(&args)?,
            "seed" => {
                self.seed = match read_string(&args)? {
                    "clock" => None,
                    _ => Some(read_parse(&args)?),
                }
            }
            "loglevel" => self.loglevel = read_parse(&args)?,
            "logfile" => {
                self.logfile = match read_string(&args)? {
                    "" | "stdout" => None,
                    path => Some(path.to_owned()),
                }
            }
            "include" => {
                let path = read_string(&args)?.to_owned();
                self.parsefile(&path)?;
            }
            other => return Err(ConfigError::UnknownDirective(other.to_owned())),
        };
        Ok(())
    }

    /// Builds the logger described by `loglevel` and `logfile`.
    pub fn logger(&self) -> Result<Logger, ConfigError> {
        match self.logfile {
            Some(ref path) => Ok(Logger::file(self.loglevel, path)?),
            None => Ok(Logger::new(self.loglevel)),
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

impl From<IOError> for ConfigError {
    fn from(e: IOError) -> ConfigError {
        ConfigError::IOError(e)
    }
}
