//! Structured triangular mesh over a rectangular grid.

use {
    crate::error::{DeckError, Result},
    ndarray::{Array2, ArrayView1},
};

/// Nodes and 1-based triangle connectivity of a structured grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Grid columns
    pub nx: usize,
    /// Grid rows
    pub nz: usize,
    /// One `(x, z)` row per node, top row first, x ascending within a row
    pub nodes: Array2<f64>,
    /// One row of three 1-based node numbers per triangle
    pub elements: Array2<usize>,
}

impl Mesh {
    pub fn node_count(&self) -> usize {
        self.nodes.nrows()
    }

    pub fn element_count(&self) -> usize {
        self.elements.nrows()
    }

    pub fn node(&self, i: usize) -> ArrayView1<f64> {
        self.nodes.row(i)
    }
}

/// Checks that a grid axis has at least two strictly increasing entries.
pub fn check_axis(name: &str, axis: &[f64]) -> Result<()> {
    if axis.len() < 2 {
        return Err(DeckError::config(format!(
            "{} grid needs at least 2 coordinates, found {}",
            name,
            axis.len()
        )));
    }
    if let Some(i) = axis.windows(2).position(|w| !(w[0] < w[1])) {
        return Err(DeckError::config(format!(
            "{} grid is not strictly increasing at index {}",
            name,
            i + 1
        )));
    }
    Ok(())
}

/// Builds the mesh for ordered grid coordinates.
///
/// Every cell is split along its bottom-left to top-right diagonal, cells
/// scanned rows outer and columns inner.
pub fn generate(x: &[f64], z: &[f64]) -> Result<Mesh> {
    check_axis("x", x)?;
    check_axis("z", z)?;

    let (nx, nz) = (x.len(), z.len());

    let mut nodes = Array2::<f64>::zeros((nx * nz, 2));
    for (r, zr) in z.iter().rev().enumerate() {
        for (c, xc) in x.iter().enumerate() {
            let mut node = nodes.row_mut(r * nx + c);
            node[0] = *xc;
            node[1] = *zr;
        }
    }

    let node_number = |r: usize, c: usize| -> usize { r * nx + c + 1 };

    let mut elements = Array2::<usize>::zeros((2 * (nx - 1) * (nz - 1), 3));
    let mut cells = elements.outer_iter_mut();
    for r in 0..nz - 1 {
        for c in 0..nx - 1 {
            let top_left = node_number(r, c);
            let top_right = node_number(r, c + 1);
            let bottom_left = node_number(r + 1, c);
            let bottom_right = node_number(r + 1, c + 1);

            for corners in [
                [top_left, bottom_left, top_right],
                [top_right, bottom_left, bottom_right],
            ]
            .iter()
            {
                if let Some(mut element) = cells.next() {
                    element
                        .iter_mut()
                        .zip(corners.iter())
                        .for_each(|(e, n)| *e = *n);
                }
            }
        }
    }

    Ok(Mesh {
        nx,
        nz,
        nodes,
        elements,
    })
}

/// Sorted distinct x and z coordinates of a node list.
pub fn grid_axes(nodes: &Array2<f64>) -> (Vec<f64>, Vec<f64>) {
    let axis = |column: usize| {
        let mut values = nodes.column(column).to_vec();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        values.dedup();
        values
    };
    (axis(0), axis(1))
}

#[cfg(test)]
mod test {
    use {super::*, approx::assert_abs_diff_eq, ndarray::array};

    #[test]
    fn cardinality() {
        let mesh = generate(&[0.0, 1.0, 2.0], &[0.0, 1.0]).unwrap();
        assert_eq!(mesh.node_count(), 6);
        assert_eq!(mesh.element_count(), 4);
    }

    #[test]
    fn node_order() {
        let mesh = generate(&[0.0, 5.0, 12.5], &[-3.0, 0.0, 4.0]).unwrap();
        assert_abs_diff_eq!(mesh.node(0), array![0.0, 4.0]);
        assert_abs_diff_eq!(mesh.node(2), array![12.5, 4.0]);
        assert_abs_diff_eq!(mesh.node(3), array![0.0, 0.0]);
        assert_abs_diff_eq!(mesh.node(8), array![12.5, -3.0]);
    }

    #[test]
    fn connectivity() {
        let mesh = generate(&[0.0, 1.0, 2.0], &[0.0, 1.0]).unwrap();
        assert_eq!(
            mesh.elements,
            array![[1, 4, 2], [2, 4, 5], [2, 5, 3], [3, 5, 6]]
        );
    }

    #[test]
    fn elements_stay_inside_grid() {
        let mesh = generate(&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.0, 2.0, 4.0]).unwrap();
        let n = mesh.node_count();
        assert!(mesh.elements.iter().all(|&i| i >= 1 && i <= n));
        assert_eq!(mesh.element_count(), 2 * 4 * 2);

        // every node appears in some element
        let mut used = vec![false; n];
        mesh.elements.iter().for_each(|&i| used[i - 1] = true);
        assert!(used.iter().all(|u| *u));
    }

    #[test]
    fn counter_clockwise() {
        let mesh = generate(&[0.0, 1.0, 3.0], &[0.0, 2.0, 3.0]).unwrap();
        for element in mesh.elements.outer_iter() {
            let p = |k: usize| mesh.node(element[k] - 1).to_owned();
            let (a, b, c) = (p(0), p(1), p(2));
            let area = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            assert!(area > 0.0);
        }
    }

    #[test]
    fn rejects_unordered_axis() {
        assert!(matches!(
            generate(&[0.0, 1.0, 1.0], &[0.0, 1.0]),
            Err(DeckError::Config(_))
        ));
        assert!(generate(&[0.0], &[0.0, 1.0]).is_err());
    }

    #[test]
    fn axes_recovered_from_nodes() {
        let mesh = generate(&[0.0, 5.0, 12.5], &[-3.0, 0.0, 4.0]).unwrap();
        let (x, z) = grid_axes(&mesh.nodes);
        assert_eq!(x, vec![0.0, 5.0, 12.5]);
        assert_eq!(z, vec![-3.0, 0.0, 4.0]);
    }
}
