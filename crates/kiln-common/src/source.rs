use std::path::Path;

/// The language of a source file, as far as the build description cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    C,
    Cpp,
    ObjC,
    ObjCpp,
    Header,
}

impl Language {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "c" => Some(Language::C),
            "cpp" | "cc" | "cxx" | "c++" => Some(Language::Cpp),
            "m" => Some(Language::ObjC),
            "mm" => Some(Language::ObjCpp),
            "h" | "hpp" | "hh" => Some(Language::Header),
            _ => None,
        }
    }

    /// Classify a path by extension. Anything unrecognised is generic C source.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or(Language::C)
    }

    /// The `lastKnownFileType` Xcode records for this language.
    pub fn xcode_file_type(self) -> &'static str {
        match self {
            Language::C => "sourcecode.c.c",
            Language::Cpp => "sourcecode.cpp.cpp",
            Language::ObjC => "sourcecode.c.objc",
            Language::ObjCpp => "sourcecode.cpp.objcpp",
            Language::Header => "sourcecode.c.h",
        }
    }
}
