use crate::cells::Cartesian2DCoordinate;

/// Supplies the contents drawn inside each cell when a grid is rendered as text.
pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Cartesian2DCoordinate) -> String {
        String::from("   ")
    }
}
