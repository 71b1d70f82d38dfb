//! Portrait path resolution.

pub const DEFAULT_ASSET_ROOT: &str = "assets/";
pub const DEFAULT_PORTRAIT_FILE: &str = "portrait1.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    root: String,
    default_portrait: String,
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self::new(
            DEFAULT_ASSET_ROOT,
            format!("{DEFAULT_ASSET_ROOT}{DEFAULT_PORTRAIT_FILE}"),
        )
    }
}

impl AssetResolver {
    pub fn new(root: impl Into<String>, default_portrait: impl Into<String>) -> Self {
        let mut root = root.into();
        if !root.is_empty() && !root.ends_with('/') {
            root.push('/');
        }
        Self {
            root,
            default_portrait: default_portrait.into(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn default_portrait(&self) -> &str {
        &self.default_portrait
    }

    /// Paths that already contain a separator are used verbatim. Bare filenames are
    /// placed under the asset root with `.jpg` rewritten to `.png`.
    pub fn resolve(&self, portrait: Option<&str>) -> String {
        let Some(portrait) = portrait.filter(|p| !p.is_empty()) else {
            return self.default_portrait.clone();
        };

        if portrait.contains('/') || portrait.contains('\\') {
            return portrait.to_string();
        }

        format!("{}{}", self.root, rewrite_jpg_as_png(portrait))
    }
}

fn rewrite_jpg_as_png(file_name: &str) -> String {
    let Some(stem_len) = file_name.len().checked_sub(".jpg".len()) else {
        return file_name.to_string();
    };
    if !file_name.is_char_boundary(stem_len) {
        return file_name.to_string();
    }

    let (stem, extension) = file_name.split_at(stem_len);
    if extension.eq_ignore_ascii_case(".jpg") {
        format!("{stem}.png")
    } else {
        file_name.to_string()
    }
}
