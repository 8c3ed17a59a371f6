//! Engine enum families
//!
//! The engine reports enum-typed fields as bare ordinals. Each family below
//! owns the exhaustive ordinal table and its host representation. An ordinal
//! missing from a table means the engine and this crate disagree about the
//! ABI; the encoder turns that into a fatal error instead of guessing.

use core::fmt;
use core::marker::PhantomData;

use crate::host::HostValue;

/// A closed set of engine enum values with a host representation
pub trait EnumFamily: Copy + Sized + 'static {
    /// Family name used in diagnostics
    const NAME: &'static str;

    /// Every member, in ordinal order
    const ALL: &'static [Self];

    /// Map an engine ordinal to a member
    fn from_ordinal(ordinal: u32) -> Option<Self>;

    /// Engine ordinal of this member
    fn ordinal(self) -> u32;

    /// Host representation (label for string-valued families, number otherwise)
    fn to_host(self) -> HostValue;
}

/// Raw engine ordinal tagged with the family it belongs to
pub struct Ordinal<T> {
    value: u32,
    family: PhantomData<fn() -> T>,
}

impl<T: EnumFamily> Ordinal<T> {
    /// Wrap an ordinal exactly as the engine reported it
    #[must_use]
    pub const fn raw(value: u32) -> Self {
        Self {
            value,
            family: PhantomData,
        }
    }

    /// Ordinal of a known member
    #[must_use]
    pub fn of(member: T) -> Self {
        Self::raw(member.ordinal())
    }

    /// The raw ordinal
    #[must_use]
    pub const fn value(self) -> u32 {
        self.value
    }

    /// Resolve to a member, `None` if the ordinal is unmapped
    #[must_use]
    pub fn resolve(self) -> Option<T> {
        T::from_ordinal(self.value)
    }
}

impl<T> Clone for Ordinal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Ordinal<T> {}

impl<T> PartialEq for Ordinal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Ordinal<T> {}

impl<T: EnumFamily> fmt::Debug for Ordinal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", T::NAME, self.value)
    }
}

impl<T: EnumFamily> From<T> for Ordinal<T> {
    fn from(member: T) -> Self {
        Self::of(member)
    }
}

/// Declares a family whose members map to fixed host labels
macro_rules! labelled_family {
    (
        $(#[$meta:meta])*
        $name:ident, $family:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $ordinal:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Host label of this member
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label ),+
                }
            }
        }

        impl EnumFamily for $name {
            const NAME: &'static str = $family;
            const ALL: &'static [Self] = &[$( Self::$variant ),+];

            fn from_ordinal(ordinal: u32) -> Option<Self> {
                match ordinal {
                    $( $ordinal => Some(Self::$variant), )+
                    _ => None,
                }
            }

            fn ordinal(self) -> u32 {
                match self {
                    $( Self::$variant => $ordinal ),+
                }
            }

            fn to_host(self) -> HostValue {
                HostValue::from(self.label())
            }
        }
    };
}

/// Declares a family whose members are handed to the host as their ordinal
macro_rules! numeric_family {
    (
        $(#[$meta:meta])*
        $name:ident, $family:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $ordinal:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl EnumFamily for $name {
            const NAME: &'static str = $family;
            const ALL: &'static [Self] = &[$( Self::$variant ),+];

            fn from_ordinal(ordinal: u32) -> Option<Self> {
                match ordinal {
                    $( $ordinal => Some(Self::$variant), )+
                    _ => None,
                }
            }

            fn ordinal(self) -> u32 {
                match self {
                    $( Self::$variant => $ordinal ),+
                }
            }

            fn to_host(self) -> HostValue {
                HostValue::from(self.ordinal())
            }
        }
    };
}

labelled_family! {
    /// Line terminator detected in the source
    LineType, "line type" {
        /// `\r\n`
        CrLf = 0 => "CrLf",
        /// `\n`
        Lf = 1 => "Lf",
        /// `\r`
        Cr = 2 => "Cr",
    }
}

labelled_family! {
    /// Text encoding detected in the source
    FileType, "file type" {
        /// No byte order mark and not valid UTF-8
        Unknown = 0 => "Unknown",
        Utf8 = 1 => "UTF-8",
        Utf16Be = 2 => "UTF-16BE",
        Utf16Le = 3 => "UTF-16LE",
        Utf32Be = 4 => "UTF-32BE",
        Utf32Le = 5 => "UTF-32LE",
    }
}

labelled_family! {
    /// Kind of an `[Events]` line
    EventType, "event type" {
        Dialogue = 0 => "Dialogue",
        Comment = 1 => "Comment",
        Picture = 2 => "Picture",
        Sound = 3 => "Sound",
        Movie = 4 => "Movie",
        Command = 5 => "Command",
    }
}

labelled_family! {
    /// Declared `ScriptType` of the script
    ScriptType, "script type" {
        /// Missing or unrecognised `ScriptType`
        Unknown = 0 => "Unknown",
        /// `v4.00` (SSA)
        V4 = 1 => "V4",
        /// `v4.00+` (ASS)
        V4Plus = 2 => "V4Plus",
    }
}

numeric_family! {
    /// `WrapStyle` from `[Script Info]`
    WrapStyle, "wrap style" {
        /// Smart wrapping, top line wider
        Smart = 0,
        /// End-of-line wrapping only
        EndOfLine = 1,
        /// No wrapping, `\n` and `\N` both break
        NoWrap = 2,
        /// Smart wrapping, bottom line wider
        SmartLower = 3,
    }
}

numeric_family! {
    /// `BorderStyle` of a style
    BorderStyle, "border style" {
        /// Outline with drop shadow
        Outline = 1,
        /// Opaque box behind the text
        OpaqueBox = 3,
    }
}

numeric_family! {
    /// Numpad-style alignment of a style
    Alignment, "alignment" {
        BottomLeft = 1,
        BottomCenter = 2,
        BottomRight = 3,
        MiddleLeft = 4,
        MiddleCenter = 5,
        MiddleRight = 6,
        TopLeft = 7,
        TopCenter = 8,
        TopRight = 9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_table_is_consistent<T: EnumFamily + PartialEq + fmt::Debug>() {
        for &member in T::ALL {
            assert_eq!(T::from_ordinal(member.ordinal()), Some(member), "{}", T::NAME);
        }
    }

    #[test]
    fn every_table_round_trips() {
        assert_table_is_consistent::<LineType>();
        assert_table_is_consistent::<FileType>();
        assert_table_is_consistent::<EventType>();
        assert_table_is_consistent::<ScriptType>();
        assert_table_is_consistent::<WrapStyle>();
        assert_table_is_consistent::<BorderStyle>();
        assert_table_is_consistent::<Alignment>();
    }

    #[test]
    fn labels_follow_engine_spelling() {
        assert_eq!(FileType::Utf16Be.label(), "UTF-16BE");
        assert_eq!(FileType::Utf8.to_host(), HostValue::from("UTF-8"));
        assert_eq!(ScriptType::V4Plus.label(), "V4Plus");
    }

    #[test]
    fn numeric_families_expose_ordinals() {
        assert_eq!(BorderStyle::OpaqueBox.to_host(), HostValue::from(3u32));
        assert_eq!(Alignment::TopRight.to_host(), HostValue::from(9u32));
        assert_eq!(BorderStyle::from_ordinal(2), None);
    }

    #[test]
    fn ordinal_debug_names_family() {
        assert_eq!(format!("{:?}", Ordinal::<LineType>::raw(7)), "line type#7");
        assert_eq!(Ordinal::of(EventType::Movie).value(), 4);
        assert_eq!(Ordinal::<EventType>::raw(6).resolve(), None);
    }
}
