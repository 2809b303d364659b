//! Composite of geometries with optional bounding-box culling.
//!
//! Geometries and groups live in flat arenas and reference each other by
//! index. Group 0 is the root. Boxes are only computed by
//! [`Geometries::make_cbr`] (or [`Geometries::make_bvh`]); until then every
//! child is tested against every ray.

use crate::geometry::{find_closest, GeoPoint, Geometry};
use lumen_math::{BoundingBox, Ray};

const ROOT: usize = 0;

/// Extent of a geometry or group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Bounds {
    /// Contains nothing
    Empty,
    Finite(BoundingBox),
    /// Infinite, or not yet computed
    Unbounded,
}

impl Bounds {
    pub(crate) fn union(self, other: Bounds) -> Bounds {
        match (self, other) {
            (Bounds::Unbounded, _) | (_, Bounds::Unbounded) => Bounds::Unbounded,
            (Bounds::Empty, b) | (b, Bounds::Empty) => b,
            (Bounds::Finite(a), Bounds::Finite(b)) => Bounds::Finite(a.union(&b)),
        }
    }

    fn may_hit(&self, ray: &Ray) -> bool {
        match self {
            Bounds::Empty => false,
            Bounds::Finite(bbox) => bbox.has_intersections(ray),
            Bounds::Unbounded => true,
        }
    }
}

impl From<Option<BoundingBox>> for Bounds {
    fn from(bbox: Option<BoundingBox>) -> Self {
        bbox.map_or(Bounds::Unbounded, Bounds::Finite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Child {
    Geometry(usize),
    Group(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct Group {
    pub(crate) children: Vec<Child>,
    pub(crate) bounds: Bounds,
}

impl Group {
    pub(crate) fn new(children: Vec<Child>) -> Self {
        Self {
            children,
            bounds: Bounds::Unbounded,
        }
    }
}

/// A tree of geometries answering intersection queries as one unit.
#[derive(Debug)]
pub struct Geometries {
    pub(crate) geometries: Vec<Geometry>,
    pub(crate) geometry_bounds: Vec<Bounds>,
    pub(crate) groups: Vec<Group>,
}

impl Default for Geometries {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometries {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self {
            geometries: Vec::new(),
            geometry_bounds: Vec::new(),
            groups: vec![Group::new(Vec::new())],
        }
    }

    /// Add a geometry at the root. Discards computed boxes.
    pub fn add(&mut self, geometry: Geometry) {
        self.invalidate_bounds();
        self.groups[ROOT]
            .children
            .push(Child::Geometry(self.geometries.len()));
        self.geometries.push(geometry);
    }

    /// Nest another composite as a single child of the root.
    /// Discards computed boxes.
    pub fn add_group(&mut self, other: Geometries) {
        self.invalidate_bounds();

        let geometry_offset = self.geometries.len();
        let group_offset = self.groups.len();
        self.geometries.extend(other.geometries);
        self.groups.extend(other.groups.into_iter().map(|group| {
            let children = group
                .children
                .into_iter()
                .map(|child| match child {
                    Child::Geometry(i) => Child::Geometry(i + geometry_offset),
                    Child::Group(g) => Child::Group(g + group_offset),
                })
                .collect();
            Group::new(children)
        }));
        // The other root landed at `group_offset`
        self.groups[ROOT].children.push(Child::Group(group_offset));
    }

    /// Number of geometries in the whole tree.
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Number of groups in the tree, the root included.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Compute bounding boxes for every geometry and group, enabling culling.
    ///
    /// A group containing an unbounded child is itself unbounded and is
    /// never culled.
    pub fn make_cbr(&mut self) {
        self.geometry_bounds = self
            .geometries
            .iter()
            .map(|g| Bounds::from(g.bounding_box()))
            .collect();
        self.compute_bounds(ROOT);
    }

    pub(crate) fn compute_bounds(&mut self, group: usize) -> Bounds {
        let children = std::mem::take(&mut self.groups[group].children);
        let mut bounds = Bounds::Empty;
        for &child in &children {
            let child_bounds = match child {
                Child::Geometry(i) => self.geometry_bounds[i],
                Child::Group(g) => self.compute_bounds(g),
            };
            bounds = bounds.union(child_bounds);
        }
        self.groups[group].children = children;
        self.groups[group].bounds = bounds;
        bounds
    }

    fn invalidate_bounds(&mut self) {
        self.geometry_bounds.clear();
        for group in &mut self.groups {
            group.bounds = Bounds::Unbounded;
        }
    }

    pub(crate) fn bounds_of(&self, child: Child) -> Bounds {
        match child {
            Child::Geometry(i) => self
                .geometry_bounds
                .get(i)
                .copied()
                .unwrap_or(Bounds::Unbounded),
            Child::Group(g) => self.groups[g].bounds,
        }
    }

    /// All intersections of the ray with the tree, in no particular order.
    pub fn find_intersections(&self, ray: &Ray) -> Vec<GeoPoint<'_>> {
        let mut hits = Vec::new();
        if self.groups[ROOT].bounds.may_hit(ray) {
            self.collect_intersections(ROOT, ray, &mut hits);
        }
        hits
    }

    fn collect_intersections<'a>(&'a self, group: usize, ray: &Ray, hits: &mut Vec<GeoPoint<'a>>) {
        for &child in &self.groups[group].children {
            if !self.bounds_of(child).may_hit(ray) {
                continue;
            }
            match child {
                Child::Geometry(i) => hits.extend(self.geometries[i].find_intersections(ray)),
                Child::Group(g) => self.collect_intersections(g, ray, hits),
            }
        }
    }

    /// The intersection nearest to the ray origin.
    pub fn find_closest_intersection(&self, ray: &Ray) -> Option<GeoPoint<'_>> {
        find_closest(ray, &self.find_intersections(ray))
    }
}

impl FromIterator<Geometry> for Geometries {
    fn from_iter<I: IntoIterator<Item = Geometry>>(iter: I) -> Self {
        let mut geometries = Self::new();
        for geometry in iter {
            geometries.add(geometry);
        }
        geometries
    }
}
