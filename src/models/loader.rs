//! Text loader for job-shop instances.
//!
//! Reads the classic whitespace-separated format used by the OR-Library
//! and most JSP benchmark collections:
//!
//! ```raw
//! # optional comment lines
//! 2 2            // num_jobs num_machines
//! 0 3 1 2        // job 0: machine duration machine duration ...
//! 1 2 0 3        // job 1
//! ```
//!
//! Anything after a `#` on a line is ignored. Tokens may be split across
//! lines freely; only their order matters.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use super::Instance;
use crate::validation::ValidationErrors;

/// The error type for instance loading.
#[derive(Debug, thiserror::Error)]
pub enum InstanceParseError {
    /// An I/O error occurred while reading the input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input ended before all expected tokens were read.
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),
    /// A token could not be parsed as a number.
    #[error("could not parse token '{token}' as {expected}")]
    InvalidToken {
        /// The offending token.
        token: String,
        /// What the token was expected to be.
        expected: &'static str,
    },
    /// The header declares zero jobs or zero machines.
    #[error("instance dimensions must be positive (jobs={jobs}, machines={machines})")]
    InvalidDimensions {
        /// Declared job count.
        jobs: usize,
        /// Declared machine count.
        machines: usize,
    },
    /// The parsed data does not form a valid instance.
    #[error("invalid instance: {0}")]
    Invalid(#[from] ValidationErrors),
}

impl Instance {
    /// Loads an instance from a buffered reader.
    pub fn from_bufread<R: BufRead>(reader: R) -> Result<Self, InstanceParseError> {
        let mut sc = Scanner::new(reader);

        let num_jobs: usize = sc.next("job count")?;
        let num_machines: usize = sc.next("machine count")?;
        if num_jobs == 0 || num_machines == 0 {
            return Err(InstanceParseError::InvalidDimensions {
                jobs: num_jobs,
                machines: num_machines,
            });
        }

        // Header counts are untrusted; the vectors grow only with tokens read.
        let mut jobs = Vec::new();
        for _ in 0..num_jobs {
            let mut steps = Vec::new();
            for _ in 0..num_machines {
                let machine: usize = sc.next("machine index")?;
                let duration: i64 = sc.next("duration")?;
                steps.push((machine, duration));
            }
            jobs.push(steps);
        }

        Ok(Instance::new(num_machines, jobs)?)
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, InstanceParseError> {
        Self::from_bufread(BufReader::new(reader))
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, InstanceParseError> {
        Self::from_reader(File::open(path)?)
    }
}

impl FromStr for Instance {
    type Err = InstanceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bufread(s.as_bytes())
    }
}

/// Reads whitespace-delimited tokens line by line, skipping `#` comments.
struct Scanner<R> {
    reader: R,
    line: String,
    tokens: Vec<String>,
}

impl<R: BufRead> Scanner<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            tokens: Vec::new(),
        }
    }

    fn next<T: FromStr>(&mut self, expected: &'static str) -> Result<T, InstanceParseError> {
        loop {
            if let Some(token) = self.tokens.pop() {
                return token
                    .parse()
                    .map_err(|_| InstanceParseError::InvalidToken { token, expected });
            }

            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Err(InstanceParseError::UnexpectedEof(expected));
            }
            let content = self.line.split('#').next().unwrap_or("");
            // Reversed so that `pop` yields tokens in reading order.
            self.tokens = content.split_whitespace().rev().map(str::to_owned).collect();
        }
    }
}
