use crate::core::joiner;
use crate::core::{CombinedRecord, ConfigProvider, JoinResult, Pipeline, SourceDocuments, Storage};
use crate::utils::error::{JoinError, Result};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Value;
use std::io::{self, Write};

pub struct JoinPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> JoinPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn read_json(&self, path: &str) -> Result<Value> {
        tracing::debug!("Reading {}", self.storage.describe(path));
        let bytes = self.storage.read_file(path)?;
        serde_json::from_slice(&bytes).map_err(|source| JoinError::MalformedJson {
            path: self.storage.describe(path),
            source,
        })
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for JoinPipeline<S, C> {
    fn extract(&self) -> Result<SourceDocuments> {
        let prices = self.read_json(self.config.price_file())?;
        let details = self.read_json(self.config.detail_file())?;
        Ok(SourceDocuments { prices, details })
    }

    fn transform(&self, sources: SourceDocuments) -> Result<JoinResult> {
        joiner::combine_with_report(&sources.prices, &sources.details)
    }

    fn load(&self, result: JoinResult) -> Result<String> {
        let rendered = render_pretty(&result.records)?;

        if self.config.echo_stdout() {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&rendered)?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
        }

        let output_file = self.config.output_file();
        tracing::debug!(
            "Writing {} records ({} bytes) to {}",
            result.records.len(),
            rendered.len(),
            self.storage.describe(output_file)
        );
        self.storage.write_file(output_file, &rendered)?;

        Ok(self.storage.describe(output_file))
    }
}

/// JSON array with 4-space indentation, no trailing newline. Non-ASCII text is
/// written as `\uXXXX` escapes.
pub fn render_pretty(records: &[CombinedRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, AsciiPrettyFormatter::new(b"    "));
    records.serialize(&mut serializer)?;
    Ok(buffer)
}

/// `PrettyFormatter` that keeps string output to printable ASCII, using UTF-16
/// surrogate pairs for characters outside the BMP.
struct AsciiPrettyFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl<'a> AsciiPrettyFormatter<'a> {
    fn new(indent: &'a [u8]) -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(indent),
        }
    }
}

impl Formatter for AsciiPrettyFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0u16; 2];
        let mut start = 0;
        for (offset, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..offset])?;
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = offset + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}
