use super::{finish, BarcodeEntry, PersistenceOptions, PersistenceResult, SeededBar};
use crate::image::ImageF32;
use log::debug;

const NOT_ADDED: usize = usize::MAX;

struct Component {
    id: u64,
    birth: u8,
    seed: usize,
    size: usize,
}

/// Disjoint sets over pixel indices, with per-root component data.
struct DisjointSets {
    parent: Vec<usize>,
    comps: Vec<Option<Component>>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: vec![NOT_ADDED; n],
            comps: (0..n).map(|_| None).collect(),
        }
    }

    #[inline]
    fn is_added(&self, i: usize) -> bool {
        self.parent[i] != NOT_ADDED
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            let grand = self.parent[self.parent[i]];
            self.parent[i] = grand;
            i = grand;
        }
        i
    }

    fn comp(&self, root: usize) -> &Component {
        self.comps[root]
            .as_ref()
            .unwrap_or_else(|| unreachable!("root {root} without component data"))
    }

    /// Attach `child` root below `root`, moving its size.
    fn absorb(&mut self, root: usize, child: usize) -> Option<Component> {
        self.parent[child] = root;
        let dead = self.comps[child].take();
        if let (Some(d), Some(r)) = (dead.as_ref(), self.comps[root].as_mut()) {
            r.size += d.size;
        }
        dead
    }
}

/// Incremental sublevel-set barcode over the same threshold grid as
/// [`super::persistence_sweep`].
///
/// Newly-foreground pixels join the components of their already-foreground
/// 4-neighbours. When components merge, the one born later (ties: larger id)
/// dies at the current threshold. Zero-length bars are dropped; components
/// alive after the last slice die at 255.
pub fn persistence_union_find(gray: &ImageF32, options: &PersistenceOptions) -> PersistenceResult {
    let levels = options.levels();
    let (w, h) = (gray.w, gray.h);
    let n = gray.data.len();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| gray.data[a].total_cmp(&gray.data[b]));

    let mut sets = DisjointSets::new(n);
    let mut bars: Vec<SeededBar> = Vec::new();
    let mut next_id = 1u64;
    let mut cursor = 0usize;
    let mut roots: Vec<usize> = Vec::with_capacity(4);

    for &threshold in &levels {
        while cursor < n && gray.data[order[cursor]] < threshold as f32 {
            let p = order[cursor];
            cursor += 1;
            let (x, y) = (p % w, p / w);

            roots.clear();
            let neighbours = [
                (x > 0).then(|| p - 1),
                (x + 1 < w).then(|| p + 1),
                (y > 0).then(|| p - w),
                (y + 1 < h).then(|| p + w),
            ];
            for q in neighbours.into_iter().flatten() {
                if sets.is_added(q) {
                    let r = sets.find(q);
                    if !roots.contains(&r) {
                        roots.push(r);
                    }
                }
            }

            sets.parent[p] = p;
            if roots.is_empty() {
                sets.comps[p] = Some(Component {
                    id: next_id,
                    birth: threshold,
                    seed: p,
                    size: 1,
                });
                next_id += 1;
                continue;
            }

            let elder = *roots
                .iter()
                .min_by_key(|&&r| {
                    let c = sets.comp(r);
                    (c.birth, c.id)
                })
                .unwrap_or(&roots[0]);
            sets.parent[p] = elder;
            if let Some(c) = sets.comps[elder].as_mut() {
                c.size += 1;
            }
            for &r in roots.iter().filter(|&&r| r != elder) {
                if let Some(dead) = sets.absorb(elder, r) {
                    if dead.birth < threshold {
                        bars.push(SeededBar {
                            entry: BarcodeEntry {
                                id: dead.id,
                                birth: dead.birth,
                                death: threshold,
                                area: dead.size,
                            },
                            seed: dead.seed,
                        });
                    }
                }
            }
        }
    }

    for comp in sets.comps.iter().flatten() {
        if comp.birth < u8::MAX {
            bars.push(SeededBar {
                entry: BarcodeEntry {
                    id: comp.id,
                    birth: comp.birth,
                    death: u8::MAX,
                    area: comp.size,
                },
                seed: comp.seed,
            });
        }
    }

    debug!(
        "persistence_union_find {}x{} slices={} bars={}",
        w,
        h,
        levels.len(),
        bars.len()
    );
    finish(gray, bars, options.max_bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_basins() -> ImageF32 {
        // a dark basin (10) and a shallower one (100) joined by a ridge (200)
        let mut gray = ImageF32::from_vec(9, 3, vec![250.0; 27]);
        for y in 0..3 {
            for x in 0..9 {
                let v = match x {
                    0..=2 => 10.0,
                    3..=5 => 200.0,
                    _ => 100.0,
                };
                gray.set(x, y, v);
            }
        }
        gray
    }

    #[test]
    fn younger_basin_dies_at_the_ridge() {
        let opts = PersistenceOptions {
            thresholds: 256,
            max_bars: 10,
        };
        let res = persistence_union_find(&two_basins(), &opts);
        assert_eq!(res.bars.len(), 2, "bars={:?}", res.bars);
        let elder = res.bars[0];
        assert_eq!((elder.birth, elder.death), (11, 255));
        let younger = res.bars[1];
        assert_eq!((younger.birth, younger.death), (101, 201));
        assert!(elder.id < younger.id);
        assert!((res.span - 244.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn bar_area_is_component_size_at_death() {
        let opts = PersistenceOptions {
            thresholds: 256,
            max_bars: 10,
        };
        let res = persistence_union_find(&two_basins(), &opts);
        // the right basin is absorbed before any ridge pixel joins it
        assert_eq!(res.bars[1].area, 9);
        // the survivor has swallowed the whole raster by the last slice
        assert_eq!(res.bars[0].area, 27);
    }

    #[test]
    fn mid_threshold_mask_covers_the_basin() {
        let opts = PersistenceOptions {
            thresholds: 256,
            max_bars: 10,
        };
        let res = persistence_union_find(&two_basins(), &opts);
        // younger bar mid = 151: only the right basin is below it
        let mask = &res.bar_masks[1];
        assert_eq!(mask.data.iter().filter(|&&v| v > 0.0).count(), 9);
        assert_eq!(mask.get(7, 1), 1.0);
        assert_eq!(mask.get(1, 1), 0.0);
        assert_eq!(res.combined.get(1, 1), 1.0);
    }
}
