//! PDF Object Model
//!
//! The handful of basic PDF object types the cover page document needs,
//! and a serializer that writes them in PDF syntax.

use std::collections::BTreeMap;
use std::io::{self, Write};

/// PDF object types
#[derive(Debug, Clone)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    String(PdfString),
    /// Name object (written with a leading /)
    Name(String),
    Array(Vec<PdfObject>),
    Dictionary(PdfDictionary),
    Stream(PdfStream),
    /// Indirect reference (object number, generation number)
    Reference(u32, u16),
}

/// PDF string encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfString {
    /// Literal string enclosed in parentheses
    Literal(Vec<u8>),
    /// Hexadecimal string enclosed in angle brackets
    Hex(Vec<u8>),
}

impl PdfString {
    /// Literal string of the str's bytes
    pub fn from_str(s: &str) -> Self {
        PdfString::Literal(s.as_bytes().to_vec())
    }

    /// A PDF text string.
    ///
    /// ASCII text is written literally; anything else becomes UTF-16BE with
    /// a byte-order mark so viewers show names with accents correctly.
    pub fn text(s: &str) -> Self {
        if s.is_ascii() {
            return Self::from_str(s);
        }
        let mut bytes = vec![0xFE, 0xFF];
        for unit in s.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        PdfString::Hex(bytes)
    }
}

/// PDF dictionary, written with keys in sorted order
#[derive(Debug, Clone, Default)]
pub struct PdfDictionary {
    entries: BTreeMap<String, PdfObject>,
}

impl PdfDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: PdfObject) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PdfObject)> {
        self.entries.iter()
    }

    /// Set the Type entry
    pub fn with_type(mut self, type_name: &str) -> Self {
        self.insert("Type", PdfObject::name(type_name));
        self
    }
}

/// PDF stream (dictionary + data)
#[derive(Debug, Clone)]
pub struct PdfStream {
    pub dict: PdfDictionary,
    pub data: Vec<u8>,
    /// The data already carries its /Filter and must not be compressed again
    pub compressed: bool,
}

impl PdfStream {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            dict: PdfDictionary::new(),
            data,
            compressed: false,
        }
    }
}

/// Serializer for PDF objects
pub struct PdfSerializer<W: Write> {
    writer: W,
}

impl<W: Write> PdfSerializer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_object(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => write!(self.writer, "{}", n),
            PdfObject::Real(n) => write!(self.writer, "{}", format_real(*n)),
            PdfObject::String(s) => self.write_string(s),
            PdfObject::Name(name) => self.write_name(name),
            PdfObject::Array(arr) => self.write_array(arr),
            PdfObject::Dictionary(dict) => self.write_dictionary(dict),
            PdfObject::Stream(stream) => self.write_stream(stream),
            PdfObject::Reference(obj_num, gen_num) => {
                write!(self.writer, "{} {} R", obj_num, gen_num)
            }
        }
    }

    fn write_string(&mut self, s: &PdfString) -> io::Result<()> {
        match s {
            PdfString::Literal(data) => {
                write!(self.writer, "(")?;
                for &byte in data {
                    match byte {
                        b'(' | b')' | b'\\' => write!(self.writer, "\\{}", byte as char)?,
                        0x0A => write!(self.writer, "\\n")?,
                        0x0D => write!(self.writer, "\\r")?,
                        0x09 => write!(self.writer, "\\t")?,
                        0x20..=0x7E => write!(self.writer, "{}", byte as char)?,
                        _ => write!(self.writer, "\\{:03o}", byte)?,
                    }
                }
                write!(self.writer, ")")
            }
            PdfString::Hex(data) => {
                write!(self.writer, "<")?;
                for byte in data {
                    write!(self.writer, "{:02X}", byte)?;
                }
                write!(self.writer, ">")
            }
        }
    }

    fn write_name(&mut self, name: &str) -> io::Result<()> {
        write!(self.writer, "/")?;
        for byte in name.bytes() {
            match byte {
                b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' => {
                    write!(self.writer, "#{:02X}", byte)?
                }
                0x21..=0x7E => write!(self.writer, "{}", byte as char)?,
                _ => write!(self.writer, "#{:02X}", byte)?,
            }
        }
        Ok(())
    }

    fn write_array(&mut self, arr: &[PdfObject]) -> io::Result<()> {
        write!(self.writer, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(self.writer, " ")?;
            }
            self.write_object(obj)?;
        }
        write!(self.writer, "]")
    }

    fn write_dictionary(&mut self, dict: &PdfDictionary) -> io::Result<()> {
        write!(self.writer, "<<")?;
        for (key, value) in dict.iter() {
            write!(self.writer, " ")?;
            self.write_name(key)?;
            write!(self.writer, " ")?;
            self.write_object(value)?;
        }
        write!(self.writer, " >>")
    }

    fn write_stream(&mut self, stream: &PdfStream) -> io::Result<()> {
        self.write_dictionary(&stream.dict)?;
        write!(self.writer, "\nstream\n")?;
        self.writer.write_all(&stream.data)?;
        write!(self.writer, "\nendstream")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Format a real with at most four decimals and no trailing zeros
pub fn format_real(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        let s = format!("{:.4}", n);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

impl PdfObject {
    pub fn name(s: impl Into<String>) -> Self {
        PdfObject::Name(s.into())
    }

    pub fn reference(obj_num: u32) -> Self {
        PdfObject::Reference(obj_num, 0)
    }

    /// A text string (see [`PdfString::text`])
    pub fn text(s: &str) -> Self {
        PdfObject::String(PdfString::text(s))
    }
}

impl From<PdfDictionary> for PdfObject {
    fn from(dict: PdfDictionary) -> Self {
        PdfObject::Dictionary(dict)
    }
}

impl From<Vec<PdfObject>> for PdfObject {
    fn from(arr: Vec<PdfObject>) -> Self {
        PdfObject::Array(arr)
    }
}
