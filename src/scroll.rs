/// Fraction of the document scrolled, in `[0, 1]`. Zero when the page does
/// not scroll at all.
pub fn scroll_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let max = scroll_height - client_height;
    if max > 0.0 {
        (scroll_top / max).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn progress_transform(progress: f64) -> String {
    format!("scaleX({progress})")
}

pub fn back_to_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Deeper elements in document order drift faster.
pub fn parallax_offset(scroll_y: f64, index: usize) -> f64 {
    scroll_y * (0.06 + index as f64 * 0.02)
}

pub fn parallax_transform(offset: f64) -> String {
    format!("translateY({offset:.1}px)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped() {
        assert_eq!(scroll_progress(0.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(500.0, 2000.0, 1000.0), 0.5);
        assert_eq!(scroll_progress(1500.0, 2000.0, 1000.0), 1.0);
        assert_eq!(scroll_progress(-40.0, 2000.0, 1000.0), 0.0);
    }

    #[test]
    fn unscrollable_page_reports_zero() {
        assert_eq!(scroll_progress(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(10.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn back_to_top_needs_strictly_more_than_threshold() {
        assert!(!back_to_top_visible(300.0, 300.0));
        assert!(back_to_top_visible(300.5, 300.0));
    }

    #[test]
    fn parallax_rounds_to_one_decimal() {
        assert_eq!(parallax_transform(parallax_offset(100.0, 0)), "translateY(6.0px)");
        assert_eq!(parallax_transform(parallax_offset(123.0, 2)), "translateY(12.3px)");
        assert_eq!(progress_transform(0.25), "scaleX(0.25)");
    }
}
