//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Nodes live in a flat arena and refer to each other by index; the
//! primitives are owned by the BVH and reordered during the build so that
//! every subtree covers a contiguous range of them.

use crate::{HitRecord, Hittable, Primitive, Ray};
use glint_math::{Aabb, Interval};
use log::debug;

/// BVH node - either a branch with two children or a leaf with one primitive.
#[derive(Debug, Clone, Copy)]
pub enum BvhNode {
    /// Internal node. `left` and `right` index into the node arena.
    Branch {
        left: usize,
        right: usize,
        bbox: Aabb,
    },
    /// Leaf node. `primitive` indexes into the BVH's primitive list.
    Leaf { primitive: usize, bbox: Aabb },
}

impl BvhNode {
    pub fn bbox(&self) -> Aabb {
        match self {
            BvhNode::Branch { bbox, .. } | BvhNode::Leaf { bbox, .. } => *bbox,
        }
    }
}

/// A BVH over an owned set of primitives. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    primitives: Vec<Primitive>,
    root: Option<usize>,
}

impl Bvh {
    /// Build a BVH over `primitives`.
    ///
    /// Each level splits along the longest axis of the range's centroid
    /// bounds, ordering the range by bounding-box minimum on that axis.
    /// The sort is stable, so the same input order always yields the same
    /// tree.
    pub fn new(primitives: Vec<Primitive>) -> Self {
        let n = primitives.len();
        let mut bvh = Self {
            nodes: Vec::with_capacity((2 * n).saturating_sub(1)),
            primitives,
            root: None,
        };

        if n > 0 {
            bvh.root = Some(bvh.build(0, n));
        }

        debug!(
            "BVH built: {} primitives, {} nodes, depth {}",
            n,
            bvh.nodes.len(),
            bvh.depth()
        );
        bvh
    }

    /// Recursive build over `primitives[start..end]`, returning the index of
    /// the subtree root.
    fn build(&mut self, start: usize, end: usize) -> usize {
        let count = end - start;

        if count == 1 {
            let bbox = self.primitives[start].bounding_box();
            return self.push(BvhNode::Leaf {
                primitive: start,
                bbox,
            });
        }

        // Two primitives become two leaves as they are
        if count > 2 {
            let centroid_bounds = self.primitives[start..end]
                .iter()
                .fold(Aabb::EMPTY, |acc, obj| {
                    let c = obj.bounding_box().centroid();
                    Aabb::surrounding(&acc, &Aabb::from_points(c, c))
                });
            let axis = centroid_bounds.longest_axis();

            self.primitives[start..end].sort_by(|a, b| {
                let a_min = a.bounding_box().axis_interval(axis).min;
                let b_min = b.bounding_box().axis_interval(axis).min;
                a_min.total_cmp(&b_min)
            });
        }

        let mid = start + count / 2;
        let left = self.build(start, mid);
        let right = self.build(mid, end);
        let bbox = Aabb::surrounding(&self.nodes[left].bbox(), &self.nodes[right].bbox());

        self.push(BvhNode::Branch { left, right, bbox })
    }

    fn push(&mut self, node: BvhNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn hit_node(&self, index: usize, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self.nodes[index] {
            BvhNode::Leaf { primitive, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }
                self.primitives[primitive].hit(ray, ray_t)
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let hit_left = self.hit_node(left, ray, ray_t);

                // Only check right up to closest hit
                let right_max = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
                let hit_right = self.hit_node(right, ray, ray_t.with_max(right_max));

                hit_right.or(hit_left)
            }
        }
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// The primitives, in tree order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    pub fn root(&self) -> Option<&BvhNode> {
        self.root.map(|i| &self.nodes[i])
    }

    /// Longest root-to-leaf path, counted in nodes. 0 for an empty tree.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[BvhNode], index: usize) -> usize {
            match nodes[index] {
                BvhNode::Leaf { .. } => 1,
                BvhNode::Branch { left, right, .. } => {
                    1 + walk(nodes, left).max(walk(nodes, right))
                }
            }
        }
        self.root.map_or(0, |root| walk(&self.nodes, root))
    }
}

impl Hittable for Bvh {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.root.and_then(|root| self.hit_node(root, ray, ray_t))
    }

    fn bounding_box(&self) -> Aabb {
        self.root().map_or(Aabb::EMPTY, BvhNode::bbox)
    }
}

impl FromIterator<Primitive> for Bvh {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        Bvh::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cylinder, HittableList, Material, Sphere, Triangle};
    use glint_math::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
    use glint_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn spheres(n: usize) -> Vec<Primitive> {
        let material = Arc::new(Material::diffuse(Vec3::splat(0.5)));
        (0..n)
            .map(|i| {
                Sphere::new(Vec3::new(i as f32, 0.0, -5.0), 0.5, material.clone()).into()
            })
            .collect()
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = Bvh::new(vec![]);
        assert!(bvh.is_empty());
        assert!(bvh.root().is_none());
        assert_eq!(bvh.depth(), 0);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(bvh.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_bvh_single_sphere() {
        let bvh = Bvh::new(spheres(1));

        // Should create a leaf
        assert!(matches!(bvh.root(), Some(BvhNode::Leaf { .. })));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(bvh.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_some());
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let bvh = Bvh::new(spheres(10));

        // Full binary tree with one primitive per leaf
        assert_eq!(bvh.nodes().len(), 19);
        assert!(bvh.depth() <= 5);

        // Test ray that hits sphere at x=5
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = bvh.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        // Hit point should be near z = -4.5 (sphere at z=-5, radius 0.5)
        assert!((rec.p.z - (-4.5)).abs() < 0.01);
    }

    #[test]
    fn test_branch_boxes_cover_children() {
        let bvh = Bvh::new(spheres(7));
        for node in bvh.nodes() {
            if let BvhNode::Branch { left, right, bbox } = node {
                assert!(bbox.contains_box(&bvh.nodes()[*left].bbox()));
                assert!(bbox.contains_box(&bvh.nodes()[*right].bbox()));
            }
        }
    }

    #[test]
    fn test_nearest_hit_across_subtrees() {
        // A row of spheres along the ray: the first one must win wherever it
        // ended up in the tree
        let material = Arc::new(Material::diffuse(Vec3::ONE));
        let prims: Vec<Primitive> = (0..9)
            .rev()
            .map(|i| {
                let z = -3.0 * (i as f32 + 1.0);
                Sphere::new(Vec3::new(0.0, 0.0, z), 1.0, material.clone()).into()
            })
            .collect();
        let bvh = Bvh::new(prims);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = bvh.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = Bvh::new(spheres(13));
        let b = Bvh::new(spheres(13));
        let centers = |bvh: &Bvh| -> Vec<Vec3> {
            bvh.primitives().iter().map(|p| p.bounding_box().centroid()).collect()
        };
        assert_eq!(centers(&a), centers(&b));
        assert_eq!(a.nodes().len(), b.nodes().len());
    }

    /// Seeded mix of spheres, triangles and cylinders.
    fn random_primitives(rng: &mut StdRng, n: usize) -> Vec<Primitive> {
        let material = Arc::new(Material::diffuse(Vec3::splat(0.5)));
        let point = |rng: &mut StdRng| {
            Vec3::new(
                gen_f32(rng) * 20.0 - 10.0,
                gen_f32(rng) * 20.0 - 10.0,
                gen_f32(rng) * 20.0 - 10.0,
            )
        };

        (0..n)
            .map(|i| match i % 3 {
                0 => {
                    let center = point(rng);
                    Sphere::new(center, 0.2 + gen_f32(rng), material.clone()).into()
                }
                1 => {
                    let v0 = point(rng);
                    let v1 = v0 + random_unit_vector(rng) * 2.0;
                    let v2 = v0 + random_unit_vector(rng) * 2.0;
                    Triangle::new(v0, v1, v2, material.clone()).into()
                }
                _ => {
                    let center = point(rng);
                    Cylinder::new(
                        center,
                        random_unit_vector(rng),
                        0.2 + 0.5 * gen_f32(rng),
                        0.2 + gen_f32(rng),
                        material.clone(),
                    )
                    .into()
                }
            })
            .collect()
    }

    fn random_ray(rng: &mut StdRng) -> Ray {
        let origin = Vec3::new(
            gen_f32(rng) * 30.0 - 15.0,
            gen_f32(rng) * 30.0 - 15.0,
            gen_f32(rng) * 30.0 - 15.0,
        );
        // Aim near the middle of the scene so most rays hit something
        let target = random_in_unit_sphere(rng) * 8.0;
        Ray::new(origin, target - origin)
    }

    #[test]
    fn test_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(17);
        let prims = random_primitives(&mut rng, 60);
        let list: HittableList = prims.iter().cloned().collect();
        let bvh = Bvh::new(prims);

        let interval = Interval::new(0.001, f32::INFINITY);
        let mut hits = 0;
        for _ in 0..500 {
            let ray = random_ray(&mut rng);
            match (bvh.hit(&ray, interval), list.hit(&ray, interval)) {
                (Some(a), Some(b)) => {
                    hits += 1;
                    assert!((a.t - b.t).abs() < 1e-5, "bvh t={} list t={}", a.t, b.t);
                    assert!((a.p - b.p).length() < 1e-4);
                }
                (None, None) => {}
                (a, b) => panic!("bvh {:?} vs list {:?}", a.map(|r| r.t), b.map(|r| r.t)),
            }
        }
        assert!(hits > 50);
    }

    #[test]
    fn test_bbox_miss_means_no_hit() {
        let mut rng = StdRng::seed_from_u64(23);
        let prims = random_primitives(&mut rng, 30);
        let interval = Interval::new(0.001, f32::INFINITY);

        for _ in 0..500 {
            let ray = random_ray(&mut rng);
            for prim in &prims {
                if !prim.bounding_box().hit(&ray, interval) {
                    assert!(
                        prim.hit(&ray, interval).is_none(),
                        "{} hit outside its box",
                        prim.kind()
                    );
                }
            }
        }
    }

    #[test]
    fn test_hit_normals_face_the_ray() {
        let mut rng = StdRng::seed_from_u64(29);
        let bvh = Bvh::new(random_primitives(&mut rng, 45));
        let interval = Interval::new(0.001, f32::INFINITY);

        for _ in 0..300 {
            let ray = random_ray(&mut rng);
            if let Some(rec) = bvh.hit(&ray, interval) {
                assert!((rec.normal.length() - 1.0).abs() < 1e-4);
                assert!(rec.normal.dot(ray.direction()) <= 1e-6);
                assert!(interval.contains(rec.t));
            }
        }
    }
}

