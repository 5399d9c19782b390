//! Category spending chart rendering
//!
//! Draws a bar chart of per-category totals into an in-memory bitmap and
//! encodes it as PNG bytes, ready to be sent as a photo attachment. The
//! caller decides what to do when there is nothing to plot; this module
//! rejects empty input rather than producing an empty chart.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::{Error, Result};

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 600;

/// Render a bar chart of per-category amounts as PNG bytes
pub fn render_category_chart(categories: &[String], amounts: &[f64], title: &str) -> Result<Vec<u8>> {
    if categories.is_empty() {
        return Err(Error::Chart("nothing to plot".to_string()));
    }
    if categories.len() != amounts.len() {
        return Err(Error::Chart(format!(
            "{} categories but {} amounts",
            categories.len(),
            amounts.len()
        )));
    }

    let max_value = amounts.iter().cloned().fold(0.0f64, f64::max);
    let y_max = if max_value > 0.0 { max_value * 1.1 } else { 1.0 };
    let n = categories.len();

    let mut buf = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let draw_err = |e: &dyn std::fmt::Display| Error::Chart(e.to_string());

        let root = BitMapBackend::with_buffer(&mut buf, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| draw_err(&e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(0.0..n as f64, 0.0..y_max)
            .map_err(|e| draw_err(&e))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Category")
            .y_desc("Amount")
            .x_label_formatter(&|_| String::new())
            .y_labels(10)
            .draw()
            .map_err(|e| draw_err(&e))?;

        chart
            .draw_series(amounts.iter().enumerate().map(|(i, &v)| {
                Rectangle::new([(i as f64 + 0.15, 0.0), (i as f64 + 0.85, v)], BLUE.filled())
            }))
            .map_err(|e| draw_err(&e))?;

        // Category names under each bar, value above it
        let label_font = ("sans-serif", 18).into_font();
        let name_style = TextStyle::from(label_font.clone()).pos(Pos::new(HPos::Center, VPos::Top));
        let value_style = TextStyle::from(label_font).pos(Pos::new(HPos::Center, VPos::Bottom));

        for (i, (name, &value)) in categories.iter().zip(amounts.iter()).enumerate() {
            let x = i as f64 + 0.5;
            chart
                .draw_series(std::iter::once(Text::new(
                    name.clone(),
                    (x, 0.0),
                    name_style.clone(),
                )))
                .map_err(|e| draw_err(&e))?;
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("{:.0}", value),
                    (x, value),
                    value_style.clone(),
                )))
                .map_err(|e| draw_err(&e))?;
        }

        root.present().map_err(|e| draw_err(&e))?;
    }

    let img: image::RgbImage = image::ImageBuffer::from_raw(WIDTH, HEIGHT, buf)
        .ok_or_else(|| Error::Chart("bitmap buffer size mismatch".to_string()))?;
    let mut png = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| Error::Chart(e.to_string()))?;

    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_rejected() {
        let result = render_category_chart(&[], &[], "empty");
        assert!(matches!(result, Err(Error::Chart(_))));
    }

    #[test]
    fn test_mismatched_lengths_are_rejected() {
        let categories = vec!["Makanan".to_string()];
        let result = render_category_chart(&categories, &[1.0, 2.0], "mismatch");
        assert!(matches!(result, Err(Error::Chart(_))));
    }
}
