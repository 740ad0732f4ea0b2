use std::ops::Index;

use super::{Segment, SegmentId};

/// Flat owner of all segments on a page.
///
/// Ids are slot indices and stay valid for the whole run: segments absorbed
/// by melting or interpolation are tombstoned in place, never deallocated.
#[derive(Clone, Debug, Default)]
pub struct SegmentArena {
    segments: Vec<Segment>,
}

impl SegmentArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, col_start: i32, ys: Vec<i32>) -> SegmentId {
        let id = SegmentId(self.segments.len() as u32);
        self.segments.push(Segment::new(id, col_start, ys));
        id
    }

    pub fn get(&self, id: SegmentId) -> &Segment {
        &self.segments[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: SegmentId) -> &mut Segment {
        &mut self.segments[id.0 as usize]
    }

    pub fn is_active(&self, id: SegmentId) -> bool {
        !self.get(id).is_retired()
    }

    /// Ids of all live segments, in creation order.
    pub fn ids(&self) -> Vec<SegmentId> {
        self.segments
            .iter()
            .filter(|s| !s.is_retired())
            .map(|s| s.id)
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.segments.iter().filter(|s| !s.is_retired()).count()
    }

    pub fn retire(&mut self, id: SegmentId) {
        self.get_mut(id).retire();
    }

    /// Creates an `upper` → `lower` vertical link. Self-links and duplicates
    /// are rejected; returns whether a new link was recorded.
    pub fn link(&mut self, upper: SegmentId, lower: SegmentId) -> bool {
        if upper == lower {
            return false;
        }
        {
            let up = self.get_mut(upper);
            if up.down_links.contains(&lower) {
                return false;
            }
            up.down_links.push(lower);
        }
        let low = self.get_mut(lower);
        if !low.up_links.contains(&upper) {
            low.up_links.push(upper);
        }
        true
    }

    /// Moves every link of `from` onto `to`, deduplicated, and leaves `from`
    /// unlinked. Any direct link between the two collapses away.
    pub fn rehome_links(&mut self, from: SegmentId, to: SegmentId) {
        let (ups, downs) = {
            let s = self.get(from);
            (s.up_links.clone(), s.down_links.clone())
        };
        for up in ups {
            self.get_mut(up).down_links.retain(|&l| l != from);
            if up != to {
                let neighbor = self.get_mut(up);
                if !neighbor.down_links.contains(&to) {
                    neighbor.down_links.push(to);
                }
                let kept = self.get_mut(to);
                if !kept.up_links.contains(&up) {
                    kept.up_links.push(up);
                }
            }
        }
        for down in downs {
            self.get_mut(down).up_links.retain(|&l| l != from);
            if down != to {
                let neighbor = self.get_mut(down);
                if !neighbor.up_links.contains(&to) {
                    neighbor.up_links.push(to);
                }
                let kept = self.get_mut(to);
                if !kept.down_links.contains(&down) {
                    kept.down_links.push(down);
                }
            }
        }
        let s = self.get_mut(from);
        s.up_links.clear();
        s.down_links.clear();
        let kept = self.get_mut(to);
        kept.up_links.retain(|&l| l != from);
        kept.down_links.retain(|&l| l != from);
    }

    /// Detaches `id` from every neighbor and clears its own links.
    pub fn unlink_all(&mut self, id: SegmentId) {
        let (ups, downs) = {
            let s = self.get(id);
            (s.up_links.clone(), s.down_links.clone())
        };
        for up in ups {
            self.get_mut(up).down_links.retain(|&l| l != id);
        }
        for down in downs {
            self.get_mut(down).up_links.retain(|&l| l != id);
        }
        let s = self.get_mut(id);
        s.up_links.clear();
        s.down_links.clear();
    }
}

impl Index<SegmentId> for SegmentArena {
    type Output = Segment;

    fn index(&self, id: SegmentId) -> &Segment {
        self.get(id)
    }
}
