use super::registry::Section;

/// Vertical extent of a rendered section, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn bottom(&self) -> f64 {
        self.scroll_y + self.height
    }
}

/// Source of layout information for the tracker.
///
/// The browser implementation reads the window and `getBoundingClientRect`;
/// anything that can answer these two questions can drive the tracker.
pub trait ViewportSampler {
    fn viewport(&self) -> Viewport;

    /// Bounds of the element rendered for `id`, or `None` when nothing with
    /// that id is on the page.
    fn section_bounds(&self, id: &str) -> Option<SectionBounds>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionVisibility {
    pub id: String,
    pub fraction: f64,
}

/// Fraction of `bounds` inside `viewport`, clamped to `[0, 1]`.
pub fn visible_fraction(bounds: SectionBounds, viewport: Viewport) -> f64 {
    if bounds.height.is_nan() || bounds.height <= 0.0 {
        return 0.0;
    }
    let visible_top = viewport.scroll_y.max(bounds.top);
    let visible_bottom = viewport.bottom().min(bounds.bottom());
    let visible_height = (visible_bottom - visible_top).max(0.0);
    (visible_height / bounds.height).clamp(0.0, 1.0)
}

/// Samples every section that is currently rendered, in registry order.
pub fn sample_sections<'a, I, S>(sections: I, sampler: &S) -> Vec<SectionVisibility>
where
    I: IntoIterator<Item = &'a Section>,
    S: ViewportSampler + ?Sized,
{
    let viewport = sampler.viewport();
    sections
        .into_iter()
        .filter_map(|section| {
            let bounds = sampler.section_bounds(&section.id)?;
            Some(SectionVisibility {
                id: section.id.clone(),
                fraction: visible_fraction(bounds, viewport),
            })
        })
        .collect()
}

/// Picks the most visible sample. Only a strictly greater fraction replaces the
/// current best, so ties go to whichever section comes first.
pub fn most_visible(samples: &[SectionVisibility]) -> Option<&SectionVisibility> {
    let mut best: Option<&SectionVisibility> = None;
    for sample in samples {
        match best {
            Some(b) if sample.fraction <= b.fraction => {}
            _ => best = Some(sample),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(scroll_y: f64, height: f64) -> Viewport {
        Viewport {
            scroll_y,
            width: 1280.0,
            height,
        }
    }

    #[test]
    fn test_fully_visible_section() {
        let bounds = SectionBounds {
            top: 100.0,
            height: 200.0,
        };
        assert_eq!(visible_fraction(bounds, viewport(0.0, 800.0)), 1.0);
    }

    #[test]
    fn test_partially_visible_section() {
        // viewport 0..800, section 600..1000 -> 200 of 400 visible
        let bounds = SectionBounds {
            top: 600.0,
            height: 400.0,
        };
        assert_eq!(visible_fraction(bounds, viewport(0.0, 800.0)), 0.5);

        // scrolled past the top half
        let bounds = SectionBounds {
            top: 0.0,
            height: 400.0,
        };
        assert_eq!(visible_fraction(bounds, viewport(300.0, 800.0)), 0.25);
    }

    #[test]
    fn test_section_outside_viewport() {
        let below = SectionBounds {
            top: 2000.0,
            height: 400.0,
        };
        assert_eq!(visible_fraction(below, viewport(0.0, 800.0)), 0.0);
        let above = SectionBounds {
            top: 0.0,
            height: 100.0,
        };
        assert_eq!(visible_fraction(above, viewport(500.0, 800.0)), 0.0);
    }

    #[test]
    fn test_tall_section_fraction_is_partial() {
        // section taller than the viewport can never be fully visible
        let bounds = SectionBounds {
            top: 0.0,
            height: 1600.0,
        };
        assert_eq!(visible_fraction(bounds, viewport(400.0, 800.0)), 0.5);
    }

    #[test]
    fn test_degenerate_heights() {
        let zero = SectionBounds {
            top: 10.0,
            height: 0.0,
        };
        assert_eq!(visible_fraction(zero, viewport(0.0, 800.0)), 0.0);
        let nan = SectionBounds {
            top: 10.0,
            height: f64::NAN,
        };
        assert_eq!(visible_fraction(nan, viewport(0.0, 800.0)), 0.0);
    }

    #[test]
    fn test_most_visible_prefers_first_on_tie() {
        let samples = vec![
            SectionVisibility {
                id: "about".to_string(),
                fraction: 0.5,
            },
            SectionVisibility {
                id: "skills".to_string(),
                fraction: 0.5,
            },
            SectionVisibility {
                id: "contact".to_string(),
                fraction: 0.1,
            },
        ];
        let best = most_visible(&samples).expect("samples are not empty");
        assert_eq!(best.id, "about");
    }

    #[test]
    fn test_most_visible_empty() {
        assert!(most_visible(&[]).is_none());
    }
}
