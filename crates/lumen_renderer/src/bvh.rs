//! Bounding Volume Hierarchy (BVH) construction.
//!
//! Groups the root's bounded children into triples, bottom-up, so that a
//! ray missing a triple's box skips all three members at once.

use std::collections::VecDeque;

use crate::geometries::{Bounds, Child, Geometries, Group};

const ROOT: usize = 0;

/// Number of children packed into each new group.
const GROUP_SIZE: usize = 3;

impl Geometries {
    /// Rebuild the root into a hierarchy of boxed triples.
    ///
    /// Bounded children are sorted by the x coordinate of their box center
    /// and consumed from the front three at a time, each new group queued
    /// at the back, until fewer than three remain. Unbounded children are
    /// kept directly under the root. Bounding boxes are recomputed for the
    /// whole result.
    pub fn make_bvh(mut self) -> Self {
        self.make_cbr();

        let root_children = std::mem::take(&mut self.groups[ROOT].children);
        let (mut bounded, unbounded): (Vec<_>, Vec<_>) = root_children
            .into_iter()
            .partition(|&child| matches!(self.bounds_of(child), Bounds::Finite(_)));

        bounded.sort_by(|&a, &b| {
            let ax = center_x(self.bounds_of(a));
            let bx = center_x(self.bounds_of(b));
            ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut queue: VecDeque<Child> = bounded.into();
        while queue.len() >= GROUP_SIZE {
            let triple: Vec<Child> = queue.drain(..GROUP_SIZE).collect();
            let index = self.groups.len();
            self.groups.push(Group::new(triple));
            queue.push_back(Child::Group(index));
        }

        let mut children: Vec<Child> = queue.into();
        children.extend(unbounded);
        self.groups[ROOT].children = children;
        self.compute_bounds(ROOT);

        log::debug!(
            "BVH built: {} geometries in {} groups, {} root children",
            self.len(),
            self.group_count(),
            self.groups[ROOT].children.len()
        );

        self
    }
}

fn center_x(bounds: Bounds) -> f64 {
    match bounds {
        Bounds::Finite(bbox) => bbox.center().x,
        Bounds::Empty | Bounds::Unbounded => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cylinder, GeoPoint, Geometry, Plane, Polygon, Sphere, Tube};
    use lumen_math::{DVec3, Ray};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_scene(seed: u64) -> Geometries {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut geometries = Geometries::new();

        for _ in 0..40 {
            let center = DVec3::new(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-60.0..-20.0),
            );
            geometries.add(Geometry::new(
                Sphere::new(center, rng.gen_range(0.5..3.0)).unwrap(),
            ));
        }
        for i in 0..20 {
            let base = DVec3::new(i as f64 * 2.0 - 20.0, rng.gen_range(-10.0..10.0), -30.0);
            geometries.add(Geometry::new(
                Polygon::triangle(base, base + DVec3::new(1.5, 0.0, 0.0), base + DVec3::new(0.0, 1.5, 0.5))
                    .unwrap(),
            ));
        }
        geometries.add(Geometry::new(
            Cylinder::new(Ray::new(DVec3::new(5.0, -5.0, -25.0), DVec3::Y).unwrap(), 1.0, 4.0).unwrap(),
        ));
        geometries.add(Geometry::new(
            Plane::new(DVec3::new(0.0, -25.0, 0.0), DVec3::Y).unwrap(),
        ));
        geometries.add(Geometry::new(
            Tube::new(Ray::new(DVec3::new(0.0, 0.0, -80.0), DVec3::X).unwrap(), 2.0).unwrap(),
        ));
        geometries
    }

    fn sorted_points(hits: &[GeoPoint<'_>]) -> Vec<DVec3> {
        let mut points: Vec<DVec3> = hits.iter().map(|h| h.point()).collect();
        points.sort_by(|a, b| {
            a.to_array()
                .partial_cmp(&b.to_array())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        points
    }

    fn assert_same_hits(expected: &[GeoPoint<'_>], actual: &[GeoPoint<'_>]) {
        assert_eq!(expected.len(), actual.len());
        for (e, a) in sorted_points(expected).iter().zip(sorted_points(actual).iter()) {
            assert!(e.abs_diff_eq(*a, 1e-9), "{e:?} != {a:?}");
        }
    }

    #[test]
    fn test_bvh_finds_same_intersections() {
        let flat = random_scene(11);
        let mut cbr = random_scene(11);
        cbr.make_cbr();
        let bvh = random_scene(11).make_bvh();

        let mut rng = StdRng::seed_from_u64(5);
        let mut total_hits = 0;
        for _ in 0..300 {
            let direction = DVec3::new(
                rng.gen_range(-0.6..0.6),
                rng.gen_range(-0.6..0.6),
                -1.0,
            );
            let ray = Ray::new(DVec3::ZERO, direction).unwrap();

            let expected = flat.find_intersections(&ray);
            total_hits += expected.len();
            assert_same_hits(&expected, &cbr.find_intersections(&ray));
            assert_same_hits(&expected, &bvh.find_intersections(&ray));
        }
        // The rays actually exercised the scene
        assert!(total_hits > 0);
    }

    #[test]
    fn test_bvh_structure() {
        let bvh = random_scene(3).make_bvh();
        assert_eq!(bvh.len(), 63);

        // Both unbounded geometries stay at the root
        let root = &bvh.groups[ROOT].children;
        let unbounded = root
            .iter()
            .filter(|&&c| bvh.bounds_of(c) == Bounds::Unbounded)
            .count();
        assert_eq!(unbounded, 2);
        // Fewer than three bounded children are left at the root
        assert!(root.len() - unbounded < GROUP_SIZE);

        // Every new group holds exactly three children
        for group in &bvh.groups[1..] {
            assert_eq!(group.children.len(), GROUP_SIZE);
        }
    }

    #[test]
    fn test_bvh_small_scene() {
        let mut geometries = Geometries::new();
        geometries.add(Geometry::new(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0).unwrap()));
        geometries.add(Geometry::new(Sphere::new(DVec3::new(3.0, 0.0, -5.0), 1.0).unwrap()));

        // Two children are left as they are
        let bvh = geometries.make_bvh();
        assert_eq!(bvh.group_count(), 1);

        let ray = Ray::new(DVec3::ZERO, DVec3::NEG_Z).unwrap();
        assert_eq!(bvh.find_intersections(&ray).len(), 2);
    }

    #[test]
    fn test_bvh_empty_scene() {
        let bvh = Geometries::new().make_bvh();
        let ray = Ray::new(DVec3::ZERO, DVec3::NEG_Z).unwrap();
        assert!(bvh.find_intersections(&ray).is_empty());
    }
}
