use std::io::{self, Read};

use crate::draw::{LayoutKind, Output};

/// Where the edge list text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeSource {
    Inline(String),
    Stdin,
}

impl EdgeSource {
    pub const STDIN_SENTINEL: &'static str = "-";

    pub fn from_arg(arg: String) -> Self {
        if arg == Self::STDIN_SENTINEL {
            EdgeSource::Stdin
        } else {
            EdgeSource::Inline(arg)
        }
    }

    /// Returns the edge text, consuming `reader` only for [`EdgeSource::Stdin`].
    pub fn read(&self, mut reader: impl Read) -> io::Result<String> {
        match self {
            EdgeSource::Inline(text) => Ok(text.clone()),
            EdgeSource::Stdin => {
                let mut text = String::new();
                reader.read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub n: usize,
    pub edges: EdgeSource,
    pub output: Output,
    pub layout: LayoutKind,
    /// Skip the drawing delegate and print the adjacency list.
    pub text_only: bool,
}
