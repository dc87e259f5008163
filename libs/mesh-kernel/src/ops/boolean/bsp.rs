//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations.
//! Based on the csg.js algorithm by Evan Wallace.
//!
//! ## Algorithm
//!
//! Each BSP node contains:
//! - A dividing plane
//! - Polygons coplanar with the plane
//! - Front subtree (polygons in front of plane)
//! - Back subtree (polygons behind plane)
//!
//! ## Storage
//!
//! Nodes live in a flat arena and refer to their children by index. Every
//! traversal is iterative with an explicit stack, so deep trees built from
//! dense head surfaces cannot overflow the call stack.

use super::plane::Plane;
use super::polygon::{Polygon, SplitResult};

#[derive(Debug, Clone, Default)]
struct BspNode {
    plane: Option<Plane>,
    polygons: Vec<Polygon>,
    front: Option<usize>,
    back: Option<usize>,
}

/// A BSP tree over convex polygons.
///
/// # Example
///
/// ```rust,ignore
/// let mut tree = BspTree::new(polygons_of(&mesh));
/// tree.invert();
/// ```
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<BspNode>,
}

const ROOT: usize = 0;

impl BspTree {
    /// Creates a tree from polygons.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut tree = Self {
            nodes: vec![BspNode::default()],
        };
        tree.build(polygons);
        tree
    }

    /// Inserts polygons into the tree, extending existing nodes.
    ///
    /// Splitting planes are taken from the first polygon that reaches an
    /// empty node. Coplanar polygons of either orientation stay at the node.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let mut stack = vec![(ROOT, polygons)];

        while let Some((index, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            let plane = match self.nodes[index].plane {
                Some(plane) => plane,
                None => {
                    let plane = *polys[0].plane();
                    self.nodes[index].plane = Some(plane);
                    plane
                }
            };

            let mut out = SplitResult::default();
            for poly in polys {
                poly.split(&plane, &mut out);
            }

            let node = &mut self.nodes[index];
            node.polygons.append(&mut out.coplanar_front);
            node.polygons.append(&mut out.coplanar_back);

            if !out.front.is_empty() {
                let child = self.child(index, Side::Front);
                stack.push((child, out.front));
            }
            if !out.back.is_empty() {
                let child = self.child(index, Side::Back);
                stack.push((child, out.back));
            }
        }
    }

    /// Flips every polygon and plane and swaps front with back, turning the
    /// solid inside out.
    pub fn invert(&mut self) {
        for node in &mut self.nodes {
            for poly in &mut node.polygons {
                poly.flip();
            }
            node.plane = node.plane.map(|p| p.flip());
            std::mem::swap(&mut node.front, &mut node.back);
        }
    }

    /// Removes the parts of `polygons` inside the solid this tree bounds.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![(ROOT, polygons)];

        while let Some((index, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }
            let node = &self.nodes[index];
            let Some(plane) = node.plane else {
                result.extend(polys);
                continue;
            };

            let mut out = SplitResult::default();
            for poly in polys {
                poly.split(&plane, &mut out);
            }
            let mut front = out.front;
            front.append(&mut out.coplanar_front);
            let mut back = out.back;
            back.append(&mut out.coplanar_back);

            match node.front {
                Some(child) => stack.push((child, front)),
                None => result.extend(front),
            }
            // Without a back subtree the back side is solid.
            if let Some(child) = node.back {
                stack.push((child, back));
            }
        }

        result
    }

    /// Clips the polygons of every node of this tree against `other`.
    pub fn clip_to(&mut self, other: &BspTree) {
        for node in &mut self.nodes {
            let polygons = std::mem::take(&mut node.polygons);
            node.polygons = other.clip_polygons(polygons);
        }
    }

    /// Collects all polygons in node order.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        self.nodes
            .iter()
            .flat_map(|node| node.polygons.iter().cloned())
            .collect()
    }

    /// Number of polygons stored in the tree.
    #[cfg(test)]
    pub fn polygon_count(&self) -> usize {
        self.nodes.iter().map(|node| node.polygons.len()).sum()
    }

    fn child(&mut self, index: usize, side: Side) -> usize {
        let existing = match side {
            Side::Front => self.nodes[index].front,
            Side::Back => self.nodes[index].back,
        };
        if let Some(child) = existing {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(BspNode::default());
        match side {
            Side::Front => self.nodes[index].front = Some(child),
            Side::Back => self.nodes[index].back = Some(child),
        }
        child
    }
}

#[derive(Clone, Copy)]
enum Side {
    Front,
    Back,
}
