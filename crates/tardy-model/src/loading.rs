// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Instance loader for single-machine tardy-job problems.
//!
//! This module turns whitespace-delimited text streams into a validated
//! `Instance`. The format is a job count followed by one row per job:
//!
//! ```raw
//! n
//! id_1 r_1 p_1 d_1
//! ...
//! id_n r_n p_n d_n
//! ```
//!
//! When the loader is configured with `explicit_ids(false)` the id column is
//! omitted and jobs are numbered `1..=n` in file order. Lines may contain
//! comments introduced by `#`. The parser accepts any `BufRead`, file path,
//! raw reader, or string slice. Validation of the job data is delegated to
//! `Instance::new`, so the loader and the builder reject the same inputs.

use crate::{
    instance::{Instance, InstanceError},
    job::Job,
    num::TimeNumeric,
};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not parse token '{token}' as type {type_name}")]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "i64").
    pub type_name: &'static str,
}

/// The error type for the instance loading process.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input stream ended before all announced jobs were read.
    #[error("unexpected end of file while parsing instance")]
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    #[error("parse error: {0}")]
    Parse(#[from] ParseTokenError),
    /// The job data was read but does not form a valid instance.
    #[error("invalid instance: {0}")]
    Instance(#[from] InstanceError),
    /// Tokens remain after the last announced job.
    #[error("unexpected trailing token '{0}' after the last job")]
    TrailingInput(String),
}

/// A configurable loader for tardy-job instances.
///
/// # Configuration
/// * `explicit_ids`: rows start with a job id (default). When disabled, rows
///   are `r p d` and ids are assigned sequentially from 1.
/// * `allow_trailing`: ignore tokens after the last job instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceLoader<T> {
    explicit_ids: bool,
    allow_trailing: bool,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Default for InstanceLoader<T> {
    fn default() -> Self {
        Self {
            explicit_ids: true,
            allow_trailing: false,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> InstanceLoader<T>
where
    T: TimeNumeric + FromStr,
{
    /// Creates a new `InstanceLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether rows carry an explicit job id column.
    #[inline]
    pub fn explicit_ids(mut self, yes: bool) -> Self {
        self.explicit_ids = yes;
        self
    }

    /// Configures whether tokens after the last job are ignored.
    #[inline]
    pub fn allow_trailing(mut self, yes: bool) -> Self {
        self.allow_trailing = yes;
        self
    }

    /// Loads an instance from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Instance<T>, LoaderError> {
        let mut sc = Scanner::new(rdr);

        let n: usize = sc.next()?;
        let mut jobs = Vec::with_capacity(n);

        for position in 0..n {
            let id: u32 = if self.explicit_ids {
                sc.next()?
            } else {
                u32::try_from(position + 1).map_err(|_| ParseTokenError {
                    token: (position + 1).to_string(),
                    type_name: std::any::type_name::<u32>(),
                })?
            };
            let release: T = sc.next()?;
            let processing_time: T = sc.next()?;
            let due_date: T = sc.next()?;
            jobs.push(Job::new(id, release, processing_time, due_date));
        }

        if !self.allow_trailing
            && let Some(token) = sc.next_raw()?
        {
            return Err(LoaderError::TrailingInput(token));
        }

        Ok(Instance::new(jobs)?)
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Instance<T>, LoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance<T>, LoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Instance<T>, LoaderError> {
        self.from_reader(s.as_bytes())
    }
}

/// Writes `instance` in the format accepted by `InstanceLoader` with
/// explicit ids.
pub fn write_instance<T, W>(instance: &Instance<T>, mut out: W) -> std::io::Result<()>
where
    T: TimeNumeric,
    W: std::io::Write,
{
    writeln!(out, "{}", instance.num_jobs())?;
    for job in instance.jobs() {
        writeln!(
            out,
            "{} {} {} {}",
            job.id().get(),
            job.release(),
            job.processing_time(),
            job.due_date()
        )?;
    }
    Ok(())
}

/// A helper to read whitespace-delimited tokens from a generic reader.
struct Scanner<R> {
    rdr: R,
    buf: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    /// Creates a new `Scanner` wrapping the given reader.
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
        }
    }

    /// Refills the internal line buffer. Returns `Ok(true)` if data read, `Ok(false)` on EOF.
    #[inline]
    fn fill_line(&mut self) -> Result<bool, LoaderError> {
        self.buf.clear();
        self.pos = 0;
        let n = self.rdr.read_line(&mut self.buf)?;
        Ok(n > 0)
    }

    /// Returns the next raw token, or `None` at end of input.
    /// Skips whitespace and comments starting with '#'.
    fn next_raw(&mut self) -> Result<Option<String>, LoaderError> {
        loop {
            if self.pos >= self.buf.len() && !self.fill_line()? {
                return Ok(None);
            }

            let line = &self.buf[self.pos..];
            let content = match line.find('#') {
                Some(comment) => &line[..comment],
                None => line,
            };

            let trimmed = content.trim_start();
            if trimmed.is_empty() {
                // Rest of the line is whitespace or a comment.
                self.pos = self.buf.len();
                continue;
            }

            let start = self.pos + (content.len() - trimmed.len());
            let len = trimmed
                .find(char::is_whitespace)
                .unwrap_or(trimmed.len());
            let token = self.buf[start..start + len].to_owned();
            self.pos = start + len;
            return Ok(Some(token));
        }
    }

    /// Reads the next token and parses it into `V`.
    fn next<V>(&mut self) -> Result<V, LoaderError>
    where
        V: FromStr,
    {
        let token = self.next_raw()?.ok_or(LoaderError::UnexpectedEof)?;
        token.parse::<V>().map_err(|_| {
            LoaderError::Parse(ParseTokenError {
                token,
                type_name: std::any::type_name::<V>(),
            })
        })
    }
}
