//! Textual input and output of analyses.

use super::{CurveAnalysis, XSide};
use crate::config::CurveAnalysisConfig;
use crate::error::{CurveAnalysisError, Result};
use oxcurve_math::polynomial::text::parse_bivariate;
use oxcurve_math::AlgebraicKernel;
use std::fmt;
use std::rc::Rc;

impl CurveAnalysis {
    /// Parse a polynomial such as `y^2 - x^3 + 2*x*y` and bind it to a new
    /// engine with a private kernel and the default configuration.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_text_with(
            Rc::new(AlgebraicKernel::default()),
            CurveAnalysisConfig::default(),
            text,
        )
    }

    /// Parse a polynomial and bind it to a new engine.
    pub fn from_text_with(
        kernel: Rc<AlgebraicKernel>,
        config: CurveAnalysisConfig,
        text: &str,
    ) -> Result<Self> {
        let f = parse_bivariate(text).map_err(CurveAnalysisError::Parse)?;
        Ok(Self::with_polynomial(kernel, config, f))
    }

    /// The defining polynomial in the syntax [`Self::from_text`] reads.
    pub fn to_text(&self) -> Result<String> {
        Ok(self.polynomial()?.to_string())
    }

    /// A multi-line summary of the whole decomposition. Builds every line.
    pub fn describe(&self) -> Result<String> {
        let mut out = String::new();
        out.push_str(&format!("curve: {}\n", self.polynomial()?));
        let vertical = if self.has_vertical_component()? {
            "yes"
        } else {
            "no"
        };
        out.push_str(&format!("vertical component: {}\n", vertical));
        let n = self.number_of_status_lines_with_event()?;
        out.push_str(&format!("events: {}\n", n));
        for (name, side) in [("left", XSide::Left), ("right", XSide::Right)] {
            let values = self.asymptotic_values(side)?;
            let listed = if values.is_empty() {
                "none".to_string()
            } else {
                let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
                parts.join(", ")
            };
            out.push_str(&format!("asymptotes {}: {}\n", name, listed));
        }
        for i in 0..=n {
            out.push_str(&format!("interval {}: {} arc(s)\n", i, self.arcs_over_interval(i)?));
            if i < n {
                out.push_str(&format!("{}\n", self.status_line_at_event(i)?));
            }
        }
        Ok(out)
    }
}

impl fmt::Display for CurveAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_defining_polynomial() {
            return write!(f, "curve analysis (no polynomial)");
        }
        match self.describe() {
            Ok(text) => write!(f, "{}", text.trim_end()),
            Err(e) => write!(f, "curve analysis failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DegeneracyStrategy;

    #[test]
    fn test_text_round_trip() {
        let engine = CurveAnalysis::from_text("y^2 - x^3 + 2*x*y").expect("parse");
        let again = CurveAnalysis::from_text(&engine.to_text().expect("text")).expect("reparse");
        assert_eq!(engine.polynomial(), again.polynomial());
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = CurveAnalysis::from_text("y^^2").expect_err("malformed");
        assert!(matches!(err, CurveAnalysisError::Parse(_)));
    }

    #[test]
    fn test_describe_parabola() {
        let engine = CurveAnalysis::from_text("y^2 - x").expect("parse");
        let text = engine.describe().expect("describe");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "curve: y^2 - x");
        assert_eq!(lines[1], "vertical component: no");
        assert_eq!(lines[2], "events: 1");
        assert_eq!(lines[3], "asymptotes left: none");
        assert_eq!(lines[4], "asymptotes right: -inf, +inf");
        assert_eq!(lines[5], "interval 0: 0 arc(s)");
        assert!(lines[6].starts_with("x = 0 (event 0)"));
        assert_eq!(lines[7], "interval 1: 2 arc(s)");
    }

    #[test]
    fn test_display_without_polynomial() {
        let engine = CurveAnalysis::new(
            Rc::new(AlgebraicKernel::default()),
            CurveAnalysisConfig::default(),
        );
        assert_eq!(engine.to_string(), "curve analysis (no polynomial)");
        assert!(engine.to_text().is_err());
    }

    #[test]
    fn test_display_reports_failure() {
        // two nodes over x = 0 cannot be resolved without shearing
        let config = CurveAnalysisConfig::default().with_strategy(DegeneracyStrategy::Exception);
        let engine = CurveAnalysis::from_text_with(
            Rc::new(AlgebraicKernel::default()),
            config,
            "(y^2 - x^2)*((y - 2)^2 - x^2)",
        )
        .expect("parse");
        assert!(engine.to_string().starts_with("curve analysis failed:"));
    }
}
