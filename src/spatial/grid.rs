//! Sparse hash grid for efficient radius queries

use ahash::AHashMap;
use glam::Vec2;
use ordered_float::OrderedFloat;

use crate::core::types::ObjectId;

/// Sparse hash grid over object positions
///
/// Cells are allocated lazily; a radius query scans exactly the cell window
/// the radius covers, so query cost tracks the queried area rather than the
/// world size.
pub struct SparseHashGrid {
    cell_size: f32,
    cells: AHashMap<(i32, i32), Vec<ObjectId>>,
    positions: AHashMap<ObjectId, Vec2>,
}

impl SparseHashGrid {
    pub fn new(cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "cell_size must be positive");
        Self {
            cell_size,
            cells: AHashMap::new(),
            positions: AHashMap::new(),
        }
    }

    #[inline]
    fn cell_coord(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.positions.clear();
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, object: ObjectId) -> Option<Vec2> {
        self.positions.get(&object).copied()
    }

    pub fn insert(&mut self, object: ObjectId, pos: Vec2) {
        self.remove(object);
        let coord = self.cell_coord(pos);
        self.cells.entry(coord).or_default().push(object);
        self.positions.insert(object, pos);
    }

    pub fn remove(&mut self, object: ObjectId) {
        if let Some(pos) = self.positions.remove(&object) {
            let coord = self.cell_coord(pos);
            if let Some(cell) = self.cells.get_mut(&coord) {
                cell.retain(|&e| e != object);
                if cell.is_empty() {
                    self.cells.remove(&coord);
                }
            }
        }
    }

    /// Move an object to a new position
    pub fn update_position(&mut self, object: ObjectId, pos: Vec2) {
        self.insert(object, pos);
    }

    /// All objects within `radius` of `center`, paired with their distance
    /// and sorted nearest first
    ///
    /// The cutoff is hard: an object exactly on the radius is included,
    /// anything beyond it is not.
    pub fn query_radius(&self, center: Vec2, radius: f32) -> Vec<(ObjectId, f32)> {
        if radius < 0.0 {
            return Vec::new();
        }

        let min = self.cell_coord(center - Vec2::splat(radius));
        let max = self.cell_coord(center + Vec2::splat(radius));

        let mut hits = Vec::new();
        for cx in min.0..=max.0 {
            for cy in min.1..=max.1 {
                let Some(cell) = self.cells.get(&(cx, cy)) else {
                    continue;
                };
                for &object in cell {
                    let Some(&pos) = self.positions.get(&object) else {
                        continue;
                    };
                    let distance = center.distance(pos);
                    if distance <= radius {
                        hits.push((object, distance));
                    }
                }
            }
        }

        hits.sort_by_key(|&(_, distance)| OrderedFloat(distance));
        hits
    }

    /// Rebuild the grid from scratch
    pub fn rebuild(&mut self, objects: impl Iterator<Item = (ObjectId, Vec2)>) {
        self.clear();
        for (object, pos) in objects {
            self.insert(object, pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_query() {
        let mut grid = SparseHashGrid::new(250.0);
        let near = ObjectId::new();
        let far = ObjectId::new();
        grid.insert(near, Vec2::new(100.0, 0.0));
        grid.insert(far, Vec2::new(5000.0, 0.0));

        let hits = grid.query_radius(Vec2::ZERO, 1000.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, near);
        assert_eq!(hits[0].1, 100.0);
    }

    #[test]
    fn test_hard_cutoff_at_radius() {
        let mut grid = SparseHashGrid::new(250.0);
        let on_edge = ObjectId::new();
        let beyond = ObjectId::new();
        grid.insert(on_edge, Vec2::new(1000.0, 0.0));
        grid.insert(beyond, Vec2::new(1000.1, 0.0));

        let hits = grid.query_radius(Vec2::ZERO, 1000.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, on_edge);
    }

    #[test]
    fn test_results_sorted_by_distance() {
        let mut grid = SparseHashGrid::new(100.0);
        let ids: Vec<ObjectId> = (0..4).map(|_| ObjectId::new()).collect();
        grid.insert(ids[0], Vec2::new(700.0, 0.0));
        grid.insert(ids[1], Vec2::new(50.0, 0.0));
        grid.insert(ids[2], Vec2::new(-300.0, 0.0));
        grid.insert(ids[3], Vec2::new(0.0, 400.0));

        let hits = grid.query_radius(Vec2::ZERO, 1000.0);
        let distances: Vec<f32> = hits.iter().map(|&(_, d)| d).collect();
        assert_eq!(distances, vec![50.0, 300.0, 400.0, 700.0]);
    }

    #[test]
    fn test_query_spans_many_cells() {
        // Radius much larger than a cell must not miss distant objects
        let mut grid = SparseHashGrid::new(10.0);
        let distant = ObjectId::new();
        grid.insert(distant, Vec2::new(900.0, -900.0));
        let hits = grid.query_radius(Vec2::ZERO, 2000.0);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_remove_drops_from_queries() {
        let mut grid = SparseHashGrid::new(250.0);
        let object = ObjectId::new();
        grid.insert(object, Vec2::new(10.0, 10.0));
        assert_eq!(grid.query_radius(Vec2::ZERO, 100.0).len(), 1);

        grid.remove(object);
        assert!(grid.query_radius(Vec2::ZERO, 100.0).is_empty());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_update_position_moves_between_cells() {
        let mut grid = SparseHashGrid::new(100.0);
        let object = ObjectId::new();
        grid.insert(object, Vec2::ZERO);
        grid.update_position(object, Vec2::new(5000.0, 5000.0));

        assert!(grid.query_radius(Vec2::ZERO, 200.0).is_empty());
        assert_eq!(grid.query_radius(Vec2::new(5000.0, 5000.0), 1.0).len(), 1);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_rebuild() {
        let mut grid = SparseHashGrid::new(100.0);
        grid.insert(ObjectId::new(), Vec2::ZERO);

        let fresh = ObjectId::new();
        grid.rebuild([(fresh, Vec2::new(1.0, 1.0))].into_iter());
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.query_radius(Vec2::ZERO, 10.0)[0].0, fresh);
    }
}
