//! PDF content stream builder.
//!
//! Accumulates path construction, painting and graphics state operators for a
//! page and renders them to the byte payload of the page's content stream,
//! one operator per line with its operands in front.

use super::object_serializer::{format_number, widen_f32};
use crate::error::{Error, Result};

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Concatenate matrix `[a b c d e f]` to the CTM (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Fill color RGB (rg)
    SetFillColorRGB(f32, f32, f32),
    /// Stroke color RGB (RG)
    SetStrokeColorRGB(f32, f32, f32),
    /// Fill gray level (g)
    SetFillColorGray(f32),
    /// Stroke gray level (G)
    SetStrokeColorGray(f32),
    /// Line width (w)
    SetLineWidth(f32),
    /// Line cap style (J)
    SetLineCap(LineCap),
    /// Line join style (j)
    SetLineJoin(LineJoin),
    /// Miter limit (M)
    SetMiterLimit(f32),
    /// Dash array and phase (d)
    SetDashPattern(Vec<f32>, f32),
    /// Begin subpath (m)
    MoveTo(f32, f32),
    /// Straight segment (l)
    LineTo(f32, f32),
    /// Cubic Bézier with two control points (c)
    CurveTo(f32, f32, f32, f32, f32, f32),
    /// Cubic Bézier, first control point on the current point (v)
    CurveToV(f32, f32, f32, f32),
    /// Cubic Bézier, second control point on the end point (y)
    CurveToY(f32, f32, f32, f32),
    /// Rectangle subpath (re)
    Rectangle(f32, f32, f32, f32),
    /// Close subpath (h)
    ClosePath,
    /// Stroke (S)
    Stroke,
    /// Close and stroke (s)
    CloseStroke,
    /// Fill, non-zero winding (f)
    Fill,
    /// Fill, even-odd (f*)
    FillEvenOdd,
    /// Fill and stroke (B)
    FillStroke,
    /// End path without painting (n)
    EndPath,
}

impl ContentStreamOp {
    /// The operator token written after the operands.
    pub fn operator(&self) -> &'static str {
        use ContentStreamOp::*;
        match self {
            SaveState => "q",
            RestoreState => "Q",
            Transform(..) => "cm",
            SetFillColorRGB(..) => "rg",
            SetStrokeColorRGB(..) => "RG",
            SetFillColorGray(_) => "g",
            SetStrokeColorGray(_) => "G",
            SetLineWidth(_) => "w",
            SetLineCap(_) => "J",
            SetLineJoin(_) => "j",
            SetMiterLimit(_) => "M",
            SetDashPattern(..) => "d",
            MoveTo(..) => "m",
            LineTo(..) => "l",
            CurveTo(..) => "c",
            CurveToV(..) => "v",
            CurveToY(..) => "y",
            Rectangle(..) => "re",
            ClosePath => "h",
            Stroke => "S",
            CloseStroke => "s",
            Fill => "f",
            FillEvenOdd => "f*",
            FillStroke => "B",
            EndPath => "n",
        }
    }

    /// Plain numeric operands, in order. The dash array is not included.
    fn numbers(&self) -> Vec<f32> {
        use ContentStreamOp::*;
        match self {
            Transform(a, b, c, d, e, f) | CurveTo(a, b, c, d, e, f) => {
                vec![*a, *b, *c, *d, *e, *f]
            },
            CurveToV(a, b, c, d) | CurveToY(a, b, c, d) | Rectangle(a, b, c, d) => {
                vec![*a, *b, *c, *d]
            },
            SetFillColorRGB(a, b, c) | SetStrokeColorRGB(a, b, c) => vec![*a, *b, *c],
            MoveTo(a, b) | LineTo(a, b) => vec![*a, *b],
            SetFillColorGray(a) | SetStrokeColorGray(a) | SetLineWidth(a) | SetMiterLimit(a) => {
                vec![*a]
            },
            SetLineCap(cap) => vec![*cap as u8 as f32],
            SetLineJoin(join) => vec![*join as u8 as f32],
            SetDashPattern(_, phase) => vec![*phase],
            _ => Vec::new(),
        }
    }

    /// Append this operation as one line.
    fn write_line(&self, buf: &mut Vec<u8>) -> Result<()> {
        if let ContentStreamOp::SetDashPattern(dashes, _) = self {
            let items = dashes
                .iter()
                .map(|d| operand(*d, self))
                .collect::<Result<Vec<_>>>()?;
            buf.push(b'[');
            buf.extend_from_slice(items.join(" ").as_bytes());
            buf.extend_from_slice(b"] ");
        }
        for value in self.numbers() {
            buf.extend_from_slice(operand(value, self)?.as_bytes());
            buf.push(b' ');
        }
        buf.extend_from_slice(self.operator().as_bytes());
        buf.push(b'\n');
        Ok(())
    }
}

/// Render one operand; NaN and infinities have no textual form.
fn operand(value: f32, op: &ContentStreamOp) -> Result<String> {
    if !value.is_finite() {
        return Err(Error::UnsupportedType(format!(
            "non-finite operand {} for operator {}",
            value,
            op.operator()
        )));
    }
    Ok(format_number(widen_f32(value)))
}

/// Line cap styles for path stroking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Square butt cap (default)
    #[default]
    Butt = 0,
    /// Round cap
    Round = 1,
    /// Projecting square cap
    Square = 2,
}

/// Line join styles for path stroking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Miter join (default)
    #[default]
    Miter = 0,
    /// Round join
    Round = 1,
    /// Bevel join
    Bevel = 2,
}

/// Builder for a page's content stream.
#[derive(Debug, Default, Clone)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentStreamOp>,
}

impl ContentStreamBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Operations added so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Set fill color (RGB, 0.0-1.0).
    pub fn set_fill_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        self.op(ContentStreamOp::SetFillColorRGB(r, g, b))
    }

    /// Set stroke color (RGB, 0.0-1.0).
    pub fn set_stroke_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        self.op(ContentStreamOp::SetStrokeColorRGB(r, g, b))
    }

    /// Set fill gray level.
    pub fn set_fill_gray(&mut self, gray: f32) -> &mut Self {
        self.op(ContentStreamOp::SetFillColorGray(gray))
    }

    /// Set stroke gray level.
    pub fn set_stroke_gray(&mut self, gray: f32) -> &mut Self {
        self.op(ContentStreamOp::SetStrokeColorGray(gray))
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.op(ContentStreamOp::SetLineWidth(width))
    }

    /// Set line cap style.
    pub fn set_line_cap(&mut self, cap: LineCap) -> &mut Self {
        self.op(ContentStreamOp::SetLineCap(cap))
    }

    /// Set line join style.
    pub fn set_line_join(&mut self, join: LineJoin) -> &mut Self {
        self.op(ContentStreamOp::SetLineJoin(join))
    }

    /// Set miter limit.
    pub fn set_miter_limit(&mut self, limit: f32) -> &mut Self {
        self.op(ContentStreamOp::SetMiterLimit(limit))
    }

    /// Dash lengths alternate on/off; an empty array draws solid lines.
    pub fn set_dash_pattern(&mut self, pattern: Vec<f32>, phase: f32) -> &mut Self {
        self.op(ContentStreamOp::SetDashPattern(pattern, phase))
    }

    /// Start a new subpath.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveTo(x, y))
    }

    /// Straight line from the current point.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::LineTo(x, y))
    }

    /// Bézier curve with explicit control points.
    pub fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) -> &mut Self {
        self.op(ContentStreamOp::CurveTo(x1, y1, x2, y2, x3, y3))
    }

    /// Bézier curve, first control point at the current point.
    pub fn curve_to_v(&mut self, x2: f32, y2: f32, x3: f32, y3: f32) -> &mut Self {
        self.op(ContentStreamOp::CurveToV(x2, y2, x3, y3))
    }

    /// Bézier curve, second control point at the end point.
    pub fn curve_to_y(&mut self, x1: f32, y1: f32, x3: f32, y3: f32) -> &mut Self {
        self.op(ContentStreamOp::CurveToY(x1, y1, x3, y3))
    }

    /// Rectangle subpath.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.op(ContentStreamOp::Rectangle(x, y, width, height))
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) -> &mut Self {
        self.op(ContentStreamOp::ClosePath)
    }

    /// Stroke the path.
    pub fn stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Stroke)
    }

    /// Close and stroke the path.
    pub fn close_stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::CloseStroke)
    }

    /// Fill the path (non-zero winding).
    pub fn fill(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Fill)
    }

    /// Fill the path (even-odd).
    pub fn fill_even_odd(&mut self) -> &mut Self {
        self.op(ContentStreamOp::FillEvenOdd)
    }

    /// Fill and stroke the path.
    pub fn fill_stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::FillStroke)
    }

    /// End the path without painting.
    pub fn end_path(&mut self) -> &mut Self {
        self.op(ContentStreamOp::EndPath)
    }

    /// Save graphics state.
    pub fn save_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::SaveState)
    }

    /// Restore graphics state.
    pub fn restore_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::RestoreState)
    }

    /// Concatenate a matrix to the current transformation.
    pub fn transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> &mut Self {
        self.op(ContentStreamOp::Transform(a, b, c, d, e, f))
    }

    /// Render the stream payload.
    ///
    /// Fails with [`Error::UnsupportedType`] on a NaN or infinite operand.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        for op in &self.operations {
            op.write_line(&mut buf)?;
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(builder: &ContentStreamBuilder) -> String {
        String::from_utf8(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_empty_stream() {
        let builder = ContentStreamBuilder::new();
        assert!(builder.operations().is_empty());
        assert_eq!(builder.build().unwrap(), b"");
    }

    #[test]
    fn test_path_operations() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .set_line_width(2.0)
            .move_to(0.0, 0.0)
            .line_to(100.0, 100.5)
            .stroke();

        assert_eq!(render(&builder), "2 w\n0 0 m\n100 100.5 l\nS\n");
    }

    #[test]
    fn test_curve_variants() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .curve_to(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
            .curve_to_v(1.0, 2.0, 3.0, 4.0)
            .curve_to_y(1.0, 2.0, 3.0, 4.0);

        assert_eq!(render(&builder), "1 2 3 4 5 6 c\n1 2 3 4 v\n1 2 3 4 y\n");
    }

    #[test]
    fn test_painting_operators() {
        let mut builder = ContentStreamBuilder::new();
        builder.rect(10.0, 20.0, 30.0, 40.0).fill();
        builder.move_to(0.0, 0.0).line_to(5.0, 5.0).close_path().fill_even_odd();
        builder.close_stroke().fill_stroke().end_path();

        assert_eq!(
            render(&builder),
            "10 20 30 40 re\nf\n0 0 m\n5 5 l\nh\nf*\ns\nB\nn\n"
        );
    }

    #[test]
    fn test_line_style_operators() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .set_line_cap(LineCap::Round)
            .set_line_join(LineJoin::Bevel)
            .set_miter_limit(10.0)
            .set_dash_pattern(vec![3.0, 2.0], 0.0)
            .set_dash_pattern(vec![], 0.0);

        assert_eq!(render(&builder), "1 J\n2 j\n10 M\n[3 2] 0 d\n[] 0 d\n");
    }

    #[test]
    fn test_state_and_color_operators() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .save_state()
            .transform(1.0, 0.0, 0.0, 1.0, 10.0, 20.0)
            .set_stroke_color(1.0, 0.0, 0.0)
            .set_fill_gray(0.5)
            .set_stroke_gray(0.25)
            .set_fill_color(0.1, 0.2, 0.3)
            .restore_state();

        assert_eq!(
            render(&builder),
            "q\n1 0 0 1 10 20 cm\n1 0 0 RG\n0.5 g\n0.25 G\n0.1 0.2 0.3 rg\nQ\n"
        );
    }

    #[test]
    fn test_negative_zero_operand_is_zero() {
        let mut builder = ContentStreamBuilder::new();
        builder.move_to(-0.0, 1.5);
        assert_eq!(render(&builder), "0 1.5 m\n");
    }

    #[test]
    fn test_non_finite_operand_fails() {
        let mut builder = ContentStreamBuilder::new();
        builder.move_to(f32::NAN, 1.0).stroke();
        assert!(matches!(builder.build(), Err(Error::UnsupportedType(_))));

        let mut dashed = ContentStreamBuilder::new();
        dashed.set_dash_pattern(vec![1.0, f32::INFINITY], 0.0);
        assert!(matches!(dashed.build(), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_default_styles() {
        assert_eq!(LineCap::default() as u8, 0);
        assert_eq!(LineJoin::default() as u8, 0);
    }
}
