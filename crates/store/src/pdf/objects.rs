//! PDF Object Model
//!
//! The subset of PDF object types needed to describe a text-only document:
//! numbers, names, strings, arrays, dictionaries, streams and indirect
//! references, plus their serialised syntax.

use std::collections::BTreeMap;
use std::io::{self, Write};

/// PDF object types
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Literal string, already in the target byte encoding
    String(Vec<u8>),
    /// Name object (written with a leading `/`)
    Name(String),
    Array(Vec<PdfObject>),
    Dictionary(PdfDictionary),
    Stream(PdfStream),
    /// Indirect reference to object `n 0`
    Reference(u32),
}

impl PdfObject {
    pub fn name(name: impl Into<String>) -> Self {
        PdfObject::Name(name.into())
    }

    pub fn string(bytes: impl Into<Vec<u8>>) -> Self {
        PdfObject::String(bytes.into())
    }

    /// A `[llx lly urx ury]` rectangle anchored at the origin
    pub fn rect(width: f64, height: f64) -> Self {
        PdfObject::Array(vec![
            PdfObject::Integer(0),
            PdfObject::Integer(0),
            PdfObject::Real(width),
            PdfObject::Real(height),
        ])
    }
}

impl From<i64> for PdfObject {
    fn from(n: i64) -> Self {
        PdfObject::Integer(n)
    }
}

impl From<usize> for PdfObject {
    fn from(n: usize) -> Self {
        PdfObject::Integer(n as i64)
    }
}

impl From<f64> for PdfObject {
    fn from(n: f64) -> Self {
        PdfObject::Real(n)
    }
}

impl From<PdfDictionary> for PdfObject {
    fn from(dict: PdfDictionary) -> Self {
        PdfObject::Dictionary(dict)
    }
}

impl From<PdfStream> for PdfObject {
    fn from(stream: PdfStream) -> Self {
        PdfObject::Stream(stream)
    }
}

impl From<Vec<PdfObject>> for PdfObject {
    fn from(items: Vec<PdfObject>) -> Self {
        PdfObject::Array(items)
    }
}

/// PDF dictionary; keys are written in sorted order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfDictionary {
    entries: BTreeMap<String, PdfObject>,
}

impl PdfDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary with a `/Type` entry
    pub fn typed(type_name: &str) -> Self {
        let mut dict = Self::new();
        dict.insert("Type", PdfObject::name(type_name));
        dict
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PdfObject>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PdfObject)> {
        self.entries.iter()
    }
}

/// PDF stream: dictionary plus raw bytes
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
}

impl PdfStream {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            dict: PdfDictionary::new(),
            data,
        }
    }

    /// Whether a filter has already been applied to the data
    pub fn is_filtered(&self) -> bool {
        self.dict.get("Filter").is_some()
    }
}

/// Format a real number: at most four decimals, trailing zeros trimmed
pub fn format_real(n: f64) -> String {
    if n.fract() == 0.0 {
        return format!("{n:.0}");
    }
    let s = format!("{n:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Append a literal string `( ... )` to `out`, escaping delimiters
pub fn write_literal(out: &mut Vec<u8>, bytes: &[u8]) {
    out.push(b'(');
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x20..=0x7E => out.push(byte),
            _ => out.extend_from_slice(format!("\\{byte:03o}").as_bytes()),
        }
    }
    out.push(b')');
}

/// Serializer for PDF objects
pub struct PdfSerializer<W: Write> {
    writer: W,
}

impl<W: Write> PdfSerializer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_object(&mut self, object: &PdfObject) -> io::Result<()> {
        match object {
            PdfObject::Integer(n) => write!(self.writer, "{n}"),
            PdfObject::Real(n) => write!(self.writer, "{}", format_real(*n)),
            PdfObject::String(bytes) => {
                let mut out = Vec::with_capacity(bytes.len() + 2);
                write_literal(&mut out, bytes);
                self.writer.write_all(&out)
            }
            PdfObject::Name(name) => self.write_name(name),
            PdfObject::Array(items) => {
                self.writer.write_all(b"[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.writer.write_all(b" ")?;
                    }
                    self.write_object(item)?;
                }
                self.writer.write_all(b"]")
            }
            PdfObject::Dictionary(dict) => self.write_dictionary(dict),
            PdfObject::Stream(stream) => {
                self.write_dictionary(&stream.dict)?;
                self.writer.write_all(b"\nstream\n")?;
                self.writer.write_all(&stream.data)?;
                self.writer.write_all(b"\nendstream")
            }
            PdfObject::Reference(n) => write!(self.writer, "{n} 0 R"),
        }
    }

    fn write_name(&mut self, name: &str) -> io::Result<()> {
        self.writer.write_all(b"/")?;
        for byte in name.bytes() {
            let delimiter = matches!(
                byte,
                b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
            );
            if (0x21..=0x7E).contains(&byte) && !delimiter {
                self.writer.write_all(&[byte])?;
            } else {
                write!(self.writer, "#{byte:02X}")?;
            }
        }
        Ok(())
    }

    fn write_dictionary(&mut self, dict: &PdfDictionary) -> io::Result<()> {
        self.writer.write_all(b"<<")?;
        for (key, value) in dict.iter() {
            self.writer.write_all(b" ")?;
            self.write_name(key)?;
            self.writer.write_all(b" ")?;
            self.write_object(value)?;
        }
        self.writer.write_all(b" >>")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Serialize a single object into a byte vector
pub fn to_bytes(object: &PdfObject) -> io::Result<Vec<u8>> {
    let mut serializer = PdfSerializer::new(Vec::new());
    serializer.write_object(object)?;
    Ok(serializer.into_inner())
}
