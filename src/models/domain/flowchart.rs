/// Output encodings requested from the diagram renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered flowchart together with the DOT source it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowchartArtifact {
    pub source: String,
    pub svg: String,
    pub png_base64: String,
}
