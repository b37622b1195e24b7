use crate::{voices::VoiceName, SynthError};

/// Longest tag name kept; longer names are truncated.
pub const MAX_TAG_LEN: usize = 16;

/// An element's tag name, upper-cased and stored inline.
///
/// `Copy` and heap-free so the tonal history can hold tags on the audio
/// thread.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    bytes: [u8; MAX_TAG_LEN],
    len: u8,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        let mut end = name.len().min(MAX_TAG_LEN);
        while !name.is_char_boundary(end) {
            end -= 1;
        }

        let mut bytes = [0u8; MAX_TAG_LEN];
        bytes[..end].copy_from_slice(&name.as_bytes()[..end]);
        bytes[..end].make_ascii_uppercase();
        Self {
            bytes,
            len: end as u8,
        }
    }

    pub fn as_str(&self) -> &str {
        // Built from a &str cut on a char boundary; ASCII case mapping keeps it UTF-8
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    pub fn class(&self) -> TagClass {
        TagClass::of(self)
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag::new(name)
    }
}

impl std::fmt::Debug for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag({})", self.as_str())
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a tag does to the music.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// Key change up a fourth
    H1,
    /// Key change up a minor seventh
    H2,
    Div,
    A,
    Li,
    Span,
    Img,
    Other,
}

impl TagClass {
    pub fn of(tag: &Tag) -> Self {
        match tag.as_str() {
            "H1" => TagClass::H1,
            "H2" => TagClass::H2,
            "DIV" => TagClass::Div,
            "A" => TagClass::A,
            "LI" => TagClass::Li,
            "SPAN" => TagClass::Span,
            "IMG" => TagClass::Img,
            _ => TagClass::Other,
        }
    }

    /// Voices triggered by this class.
    pub fn voices(self) -> &'static [VoiceName] {
        match self {
            TagClass::Div => &[VoiceName::Seq],
            TagClass::A => &[VoiceName::Kick, VoiceName::Seq],
            TagClass::Li | TagClass::Span => &[VoiceName::Sin2],
            TagClass::Img => &[VoiceName::Snr],
            TagClass::H1 | TagClass::H2 | TagClass::Other => &[VoiceName::Sin],
        }
    }

    /// Factor applied to the key base frequency, if this class changes key.
    pub fn key_ratio(self) -> Option<f32> {
        match self {
            TagClass::H1 => Some(4.0 / 3.0),
            TagClass::H2 => Some(2f32.powf(10.0 / 12.0)),
            _ => None,
        }
    }
}

/// One pre-computed trigger: the element's tag and its rendered width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagEvent {
    tag: Tag,
    width: f32,
}

impl TagEvent {
    /// Width must be finite and positive.
    pub fn new(tag: impl Into<Tag>, width: f32) -> Result<Self, SynthError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(SynthError::InvalidWidth(width));
        }
        Ok(Self {
            tag: tag.into(),
            width,
        })
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}
