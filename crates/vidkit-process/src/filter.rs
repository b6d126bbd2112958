//! Filtergraph helpers.

/// Escape a value for use as a filter option inside a filtergraph.
///
/// FFmpeg unescapes twice: once when splitting the graph into filters and
/// once when splitting a filter's options, so both levels are applied.
pub fn escape_value(value: &str) -> String {
    let option_level = escape_chars(value, &['\\', '\'', ':']);
    escape_chars(&option_level, &['\\', '\'', '[', ']', ',', ';'])
}

fn escape_chars(value: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Format seconds or factors without trailing zeros (`5`, `0.5`, `1.333333`).
pub fn num(value: f64) -> String {
    let formatted = format!("{:.6}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Scale both dimensions by `factor`.
///
/// Encoders for yuv420p need even dimensions; GIF does not.
pub fn scale_by(factor: f64, even: bool) -> String {
    let f = num(factor);
    if even {
        format!("scale=trunc(iw*{f}/2)*2:trunc(ih*{f}/2)*2:flags=lanczos")
    } else {
        format!("scale=trunc(iw*{f}):trunc(ih*{f}):flags=lanczos")
    }
}

/// Palette-based GIF tail of a filter chain.
pub fn gif_palette(dither: &str) -> String {
    format!(
        "split[s0][s1];[s0]palettegen[p];[s1][p]paletteuse=dither={}",
        escape_value(dither)
    )
}

/// Audio normalisation used wherever streams are joined or mixed.
pub fn audio_format() -> &'static str {
    "aformat=sample_rates=48000:channel_layouts=stereo"
}

/// A filtergraph assembled chain by chain.
#[derive(Debug, Default, Clone)]
pub struct FilterGraph {
    chains: Vec<String>,
}

impl FilterGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one `[in]filter,filter[out]` chain.
    pub fn chain(&mut self, chain: impl Into<String>) -> &mut Self {
        self.chains.push(chain.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn build(&self) -> String {
        self.chains.join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_value() {
        assert_eq!(escape_value("/fonts/Inter.ttf"), "/fonts/Inter.ttf");
        assert_eq!(escape_value("white"), "white");
    }

    #[test]
    fn test_escape_special_characters() {
        // ':' needs one escape per level
        assert_eq!(escape_value("C:/fonts/a.ttf"), "C\\\\:/fonts/a.ttf");
        // ',' only matters at graph level
        assert_eq!(escape_value("between(t,1,2)"), "between(t\\,1\\,2)");
        assert_eq!(escape_value("it's"), "it\\\\\\'s");
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(5.0), "5");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(1.0 / 3.0), "0.333333");
        assert_eq!(num(0.0), "0");
        assert_eq!(num(-0.0), "0");
        assert_eq!(num(12.25), "12.25");
    }

    #[test]
    fn test_scale_by() {
        assert_eq!(
            scale_by(0.5, false),
            "scale=trunc(iw*0.5):trunc(ih*0.5):flags=lanczos"
        );
        assert_eq!(
            scale_by(0.5, true),
            "scale=trunc(iw*0.5/2)*2:trunc(ih*0.5/2)*2:flags=lanczos"
        );
    }

    #[test]
    fn test_graph_join() {
        let mut graph = FilterGraph::new();
        assert!(graph.is_empty());
        graph.chain("[0:a]volume=0.5[a0]").chain("[a0]apad[aout]");
        assert_eq!(graph.build(), "[0:a]volume=0.5[a0];[a0]apad[aout]");
    }
}
