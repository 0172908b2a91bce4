/// Draws the grid one row per line, `#` for a community with the feature
/// and `.` for one without.
impl std::fmt::Debug for crate::grid::Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for bit in row.iter() {
                write!(f, "{}", if *bit { '#' } else { '.' })?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for crate::observation::ObservationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservationSettings")
            .field("log_every", &self.log_every)
            .field("frequency_file", &self.frequency_file)
            .field("isogloss_file", &self.isogloss_file)
            .field("summary_file", &self.summary_file)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::Grid;

    #[test]
    fn grid_renders_row_by_row() {
        let g = Grid::from_rows(&[vec![0, 1], vec![1, 1]]);
        assert_eq!(format!("{:?}", g), ".#\n##");
    }
}
