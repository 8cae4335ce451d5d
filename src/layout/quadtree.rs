use eframe::egui::{Pos2, Rect, Vec2};

const QUADTREE_LEAF_CAPACITY: usize = 4;
const QUADTREE_MAX_DEPTH: usize = 12;
/// Padding around the point cloud so no node sits exactly on the outer edge.
const ROOT_MARGIN: f32 = 1.0;

/// Square region covered by a quadtree cell.
#[derive(Clone, Copy, Debug)]
pub(super) struct QuadBounds(Rect);

impl QuadBounds {
    /// Smallest padded square around `points`, or `None` for an empty or
    /// non-finite input.
    fn around(points: &[Pos2]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let enclosing = Rect::from_points(points);
        if !enclosing.is_finite() {
            return None;
        }

        let side = enclosing.width().max(enclosing.height()).max(1.0) + 2.0 * ROOT_MARGIN;
        Some(Self(Rect::from_center_size(
            enclosing.center(),
            Vec2::splat(side),
        )))
    }

    pub(super) fn center(self) -> Pos2 {
        self.0.center()
    }

    pub(super) fn contains(self, point: Pos2) -> bool {
        self.0.contains(point)
    }

    pub(super) fn side_length(self) -> f32 {
        self.0.width()
    }

    /// Quadrant index: bit 0 set for the right half, bit 1 for the lower half.
    fn quadrant_for(self, point: Pos2) -> usize {
        let center = self.center();
        usize::from(point.x >= center.x) | (usize::from(point.y >= center.y) << 1)
    }

    fn child(self, quadrant: usize) -> Self {
        let center = self.center();
        let x = if quadrant & 1 == 0 {
            self.0.min.x..=center.x
        } else {
            center.x..=self.0.max.x
        };
        let y = if quadrant & 2 == 0 {
            self.0.min.y..=center.y
        } else {
            center.y..=self.0.max.y
        };
        Self(Rect::from_x_y_ranges(x, y))
    }
}

/// Barnes-Hut cell: aggregated mass of every node below it.
pub(super) struct QuadNode {
    pub(super) bounds: QuadBounds,
    pub(super) center_of_mass: Pos2,
    pub(super) mass: f32,
    pub(super) indices: Vec<usize>,
    pub(super) children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    pub(super) fn build(positions: &[Pos2]) -> Option<Self> {
        let bounds = QuadBounds::around(positions)?;
        let indices = (0..positions.len()).collect::<Vec<_>>();
        Some(Self::build_node(bounds, indices, positions, 0))
    }

    fn build_node(
        bounds: QuadBounds,
        indices: Vec<usize>,
        positions: &[Pos2],
        depth: usize,
    ) -> Self {
        let mut sum = Vec2::ZERO;
        for &index in &indices {
            sum += positions[index].to_vec2();
        }

        let mass = indices.len() as f32;
        let center_of_mass = if mass > 0.0 {
            (sum / mass).to_pos2()
        } else {
            bounds.center()
        };

        let mut node = Self {
            bounds,
            center_of_mass,
            mass,
            indices,
            children: std::array::from_fn(|_| None),
        };

        if depth >= QUADTREE_MAX_DEPTH || node.indices.len() <= QUADTREE_LEAF_CAPACITY {
            return node;
        }

        let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
        for &index in &node.indices {
            let quadrant = bounds.quadrant_for(positions[index]);
            buckets[quadrant].push(index);
        }

        let non_empty = buckets.iter().filter(|bucket| !bucket.is_empty()).count();
        if non_empty <= 1 {
            return node;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }

            node.children[quadrant] = Some(Box::new(Self::build_node(
                bounds.child(quadrant),
                bucket,
                positions,
                depth + 1,
            )));
        }
        node.indices.clear();
        node
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(|child| child.is_none())
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    fn count_leaf_indices(node: &QuadNode) -> usize {
        if node.is_leaf() {
            return node.indices.len();
        }
        node.children
            .iter()
            .flatten()
            .map(|child| count_leaf_indices(child))
            .sum()
    }

    #[test]
    fn every_point_lands_in_exactly_one_leaf() {
        let positions = (0..50)
            .map(|index| pos2((index * 37 % 101) as f32, (index * 53 % 97) as f32))
            .collect::<Vec<_>>();
        let tree = QuadNode::build(&positions).unwrap();

        assert_eq!(tree.mass, 50.0);
        assert!(!tree.is_leaf());
        assert_eq!(count_leaf_indices(&tree), 50);
        for position in &positions {
            assert!(tree.bounds.contains(*position));
        }
    }

    #[test]
    fn coincident_points_stop_splitting() {
        let positions = vec![pos2(3.0, 3.0); 20];
        let tree = QuadNode::build(&positions).unwrap();
        assert_eq!(count_leaf_indices(&tree), 20);
        assert_eq!(tree.center_of_mass, pos2(3.0, 3.0));
    }

    #[test]
    fn children_tile_their_parent() {
        let bounds = QuadBounds::around(&[pos2(0.0, 0.0), pos2(40.0, 20.0)]).unwrap();
        assert_eq!(bounds.side_length(), 42.0);
        assert_eq!(bounds.center(), pos2(20.0, 10.0));

        for (point, quadrant) in [
            (pos2(5.0, 2.0), 0),
            (pos2(35.0, 2.0), 1),
            (pos2(5.0, 18.0), 2),
            (pos2(35.0, 18.0), 3),
        ] {
            assert_eq!(bounds.quadrant_for(point), quadrant);
            let child = bounds.child(quadrant);
            assert_eq!(child.side_length(), 21.0);
            assert!(child.contains(point));
        }
    }

    #[test]
    fn empty_input_has_no_tree() {
        assert!(QuadNode::build(&[]).is_none());
    }
}
