//! HTML swatch document for a generated palette.
//!
//! Shows the seed, then the palette in generation order, then the same
//! colors sorted by similarity to the seed.

use palette_gen_core::{color_distance, sort_by_similarity, Color};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Picks black or white label text for legibility on `background`.
fn label_color(background: &Color) -> &'static str {
    let [r, g, b] = background.rgb_bytes();
    let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    if luma > 140.0 {
        "#000000"
    } else {
        "#FFFFFF"
    }
}

fn write_swatch<W: Write>(w: &mut W, color: &Color, label: &str) -> io::Result<()> {
    let hex = color.to_hex();
    writeln!(
        w,
        r#"<div class="s" style="background-color:{hex};color:{}">{label} = {hex}</div>"#,
        label_color(color)
    )
}

/// Writes the full demo document for `seed` and its `palette` to `w`.
pub fn write_html<W: Write>(w: &mut W, seed: &Color, palette: &[Color]) -> io::Result<()> {
    writeln!(
        w,
        r#"<!doctype html>
<html><head><meta charset="utf-8"><title>Palette for {seed}</title>
<style>
  body{{margin:0;padding:8px;font-family:system-ui}}
  .s{{padding:6px 10px;margin:2px 0;font-family:monospace}}
</style></head>
<body>"#
    )?;
    write_swatch(w, seed, "Base color")?;

    writeln!(w, "<h2>Palette</h2>")?;
    for (i, c) in palette.iter().enumerate() {
        write_swatch(w, c, &(i + 1).to_string())?;
    }

    writeln!(w, "<h2>Palette sorted by similarity</h2>")?;
    let mut sorted = palette.to_vec();
    sort_by_similarity(&mut sorted, seed);
    for (i, c) in sorted.iter().enumerate() {
        let label = format!("{} (distance {:.3})", i + 1, color_distance(c, seed));
        write_swatch(w, c, &label)?;
    }

    writeln!(w, "</body></html>")?;
    Ok(())
}

/// Writes the demo document to a file at `path`, returning the path written.
pub fn write_html_file(
    path: impl AsRef<Path>,
    seed: &Color,
    palette: &[Color],
) -> io::Result<PathBuf> {
    let path = path.as_ref();
    let mut w = BufWriter::new(File::create(path)?);
    write_html(&mut w, seed, palette)?;
    w.flush()?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette_gen_core::get_palette;

    fn render(seed: &Color, palette: &[Color]) -> String {
        let mut buf = Vec::new();
        write_html(&mut buf, seed, palette).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn document_has_both_sections_in_order() {
        let seed = Color::from_hex("#EACE8C").unwrap();
        let html = render(&seed, &get_palette(&seed, 12));
        let generation = html.find("<h2>Palette</h2>").unwrap();
        let sorted = html.find("<h2>Palette sorted by similarity</h2>").unwrap();
        assert!(generation < sorted);
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.trim_end().ends_with("</body></html>"));
    }

    #[test]
    fn every_color_appears_in_both_sections() {
        let seed = Color::from_hex("#EACE8C").unwrap();
        let palette = get_palette(&seed, 12);
        let html = render(&seed, &palette);
        for c in &palette {
            let needle = format!("background-color:{}", c.to_hex());
            assert!(html.matches(&needle).count() >= 2, "{} missing", c.to_hex());
        }
        // Base swatch plus one per section.
        assert_eq!(html.matches(r#"class="s""#).count(), 1 + 2 * palette.len());
    }

    #[test]
    fn empty_palette_still_renders_base_color() {
        let seed = Color::from_rgb(10, 20, 30);
        let html = render(&seed, &[]);
        assert!(html.contains("Base color = #0A141E"));
    }

    #[test]
    fn label_color_contrasts_with_background() {
        assert_eq!(label_color(&Color::from_rgb(255, 255, 255)), "#000000");
        assert_eq!(label_color(&Color::from_rgb(0, 0, 0)), "#FFFFFF");
    }

    #[test]
    fn write_html_file_creates_document() {
        let dir = tempfile::tempdir().unwrap();
        let seed = Color::from_hex("#EACE8C").unwrap();
        let path = write_html_file(dir.path().join("palette.html"), &seed, &get_palette(&seed, 6))
            .unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Base color = #EACE8C"));
    }

    #[test]
    fn write_html_file_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let seed = Color::from_rgb(1, 2, 3);
        let result = write_html_file(dir.path().join("missing/palette.html"), &seed, &[]);
        assert!(result.is_err());
    }
}
