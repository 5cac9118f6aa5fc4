//! Selection algorithms behind the fill and extrude tools.

use crate::core::types::IVec3;
use crate::math::{HitFace, RayHit};
use super::aggregate::VoxelAggregate;
use super::block::DirtyVolume;
use super::voxel::{flags, VoxelEntry};

/// Tangent axes per axis, so that `AXIS_MAP[a][1]` and `AXIS_MAP[a][2]`
/// span the plane perpendicular to `a`.
const AXIS_MAP: [[usize; 3]; 3] = [[0, 1, 2], [1, 2, 0], [2, 0, 1]];

/// Scratch marker for visited cells
const VISITED: VoxelEntry = VoxelEntry {
    color: [0; 4],
    flags: flags::NON_EMPTY | flags::TOOL_SELECT,
};

/// Which neighbours a fill may spread to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillNeighbourhood {
    /// The six face neighbours
    Volume,
    /// The four face neighbours in the plane perpendicular to `axis`
    Slice { axis: usize },
}

impl FillNeighbourhood {
    fn offsets(self) -> Vec<IVec3> {
        match self {
            FillNeighbourhood::Volume => {
                vec![IVec3::X, -IVec3::X, IVec3::Y, -IVec3::Y, IVec3::Z, -IVec3::Z]
            }
            FillNeighbourhood::Slice { axis } => plane_offsets(axis).to_vec(),
        }
    }
}

fn plane_offsets(axis: usize) -> [IVec3; 4] {
    let mut offsets = [IVec3::ZERO; 4];
    offsets[0][AXIS_MAP[axis][1]] = 1;
    offsets[1][AXIS_MAP[axis][1]] = -1;
    offsets[2][AXIS_MAP[axis][2]] = 1;
    offsets[3][AXIS_MAP[axis][2]] = -1;
    offsets
}

/// Collect the connected region of voxels equal to the one at `start`
/// (same color and flags). Empty when `start` holds no voxel.
pub fn flood_fill(aggregate: &VoxelAggregate, start: IVec3, neighbourhood: FillNeighbourhood) -> Vec<IVec3> {
    let Some(&target) = aggregate.voxel(start).filter(|v| v.is_non_empty()) else {
        return Vec::new();
    };
    let offsets = neighbourhood.offsets();
    let mut visited = VoxelAggregate::new();
    let mut region = Vec::new();
    let mut stack = vec![start];

    while let Some(pos) = stack.pop() {
        if visited.voxel(pos).is_some_and(|v| v.is_tool_selected()) {
            continue;
        }
        visited.set_voxel(pos, VISITED);
        match aggregate.voxel(pos) {
            Some(voxel) if *voxel == target => {}
            _ => continue,
        }
        region.push(pos);
        stack.extend(offsets.iter().map(|&offset| pos + offset));
    }
    log::debug!("flood fill from {:?} selected {} voxels", start, region.len());
    region
}

/// The connected patch of voxel faces around a picked face, all facing the
/// same way with nothing in front of them.
#[derive(Clone, Debug)]
pub struct FaceSelection {
    pub axis: usize,
    /// +1 or -1 along `axis`
    pub direction: i32,
    pub positions: Vec<IVec3>,
    /// Bounding volume of `positions`
    pub bound: DirtyVolume,
}

impl FaceSelection {
    /// Select starting from a voxel hit. None if the hit has no face (the
    /// ray started inside the voxel) or the face is covered.
    pub fn select(aggregate: &VoxelAggregate, hit: &RayHit) -> Option<Self> {
        let HitFace { axis, negative } = hit.face?;
        let direction = if negative { 1 } else { -1 };
        let mut front = IVec3::ZERO;
        front[axis] = direction;

        let occupied = |pos: IVec3| aggregate.voxel(pos).is_some_and(|v| v.is_non_empty());
        let mut visited = VoxelAggregate::new();
        let mut positions = Vec::new();
        let mut bound: Option<DirtyVolume> = None;
        let mut stack = vec![hit.position];

        while let Some(pos) = stack.pop() {
            if visited.voxel(pos).is_some_and(|v| v.flags != 0) {
                continue;
            }
            if !occupied(pos) || occupied(pos + front) {
                visited.set_voxel(pos, VoxelEntry::new([0; 4], flags::NO_COLLISION));
                continue;
            }
            visited.set_voxel(pos, VISITED);
            positions.push(pos);
            match bound.as_mut() {
                Some(b) => b.add_position(pos),
                None => bound = Some(DirtyVolume::from_position(pos)),
            }
            stack.extend(plane_offsets(axis).iter().map(|&offset| pos + offset));
        }

        let bound = bound?;
        Some(Self { axis, direction, positions, bound })
    }

    /// Cells that change when the extrusion height goes from `from` to `to`
    /// (both clamped to 0 or more). Growing fills these cells, shrinking
    /// clears them again.
    pub fn extrude_positions(&self, from: i32, to: i32) -> Vec<IVec3> {
        let (low, high) = (from.min(to).max(0), from.max(to).max(0));
        let mut out = Vec::with_capacity(self.positions.len() * (high - low) as usize);
        for &pos in &self.positions {
            for layer in low + 1..=high {
                let mut cell = pos;
                cell[self.axis] += layer * self.direction;
                out.push(cell);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> VoxelEntry {
        VoxelEntry::solid(255, 0, 0, 255)
    }

    fn blue() -> VoxelEntry {
        VoxelEntry::solid(0, 0, 255, 255)
    }

    fn sorted(mut v: Vec<IVec3>) -> Vec<IVec3> {
        v.sort_by_key(|p| (p.x, p.y, p.z));
        v
    }

    #[test]
    fn test_flood_fill_volume() {
        let mut ag = VoxelAggregate::new();
        for x in 14..18 {
            ag.set_voxel(IVec3::new(x, 0, 0), red());
        }
        ag.set_voxel(IVec3::new(17, 1, 0), red());
        ag.set_voxel(IVec3::new(13, 0, 0), blue());
        // diagonal only, not connected
        ag.set_voxel(IVec3::new(12, 1, 0), red());

        let region = flood_fill(&ag, IVec3::new(14, 0, 0), FillNeighbourhood::Volume);
        assert_eq!(region.len(), 5);
        assert!(!region.contains(&IVec3::new(13, 0, 0)));
        assert!(!region.contains(&IVec3::new(12, 1, 0)));
    }

    #[test]
    fn test_flood_fill_matches_flags() {
        let mut ag = VoxelAggregate::new();
        ag.set_voxel(IVec3::new(0, 0, 0), red());
        ag.set_voxel(IVec3::new(1, 0, 0), red().with_flags(flags::NO_COLLISION));
        let region = flood_fill(&ag, IVec3::ZERO, FillNeighbourhood::Volume);
        assert_eq!(region, vec![IVec3::ZERO]);
    }

    #[test]
    fn test_flood_fill_slice() {
        let mut ag = VoxelAggregate::new();
        ag.set_voxel(IVec3::new(0, 0, 0), red());
        ag.set_voxel(IVec3::new(1, 0, 0), red());
        ag.set_voxel(IVec3::new(0, 1, 0), red());
        ag.set_voxel(IVec3::new(0, 0, 1), red());

        let xy = flood_fill(&ag, IVec3::ZERO, FillNeighbourhood::Slice { axis: 2 });
        assert_eq!(
            sorted(xy),
            vec![IVec3::new(0, 0, 0), IVec3::new(0, 1, 0), IVec3::new(1, 0, 0)]
        );
        let all = flood_fill(&ag, IVec3::ZERO, FillNeighbourhood::Volume);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_flood_fill_empty_start() {
        let mut ag = VoxelAggregate::new();
        ag.set_voxel(IVec3::new(0, 0, 0), red());
        assert!(flood_fill(&ag, IVec3::new(1, 0, 0), FillNeighbourhood::Volume).is_empty());
        assert!(flood_fill(&ag, IVec3::new(90, 0, 0), FillNeighbourhood::Volume).is_empty());
    }

    fn floor() -> VoxelAggregate {
        let mut ag = VoxelAggregate::new();
        for z in -1..2 {
            for x in -1..2 {
                ag.set_voxel(IVec3::new(x, 0, z), red());
            }
        }
        ag.set_voxel(IVec3::new(0, 1, 0), blue());
        ag
    }

    fn top_hit(position: IVec3) -> RayHit {
        RayHit {
            position,
            t: 1.0,
            face: Some(HitFace { axis: 1, negative: true }),
        }
    }

    #[test]
    fn test_face_selection() {
        let ag = floor();
        let selection = FaceSelection::select(&ag, &top_hit(IVec3::new(1, 0, 1))).unwrap();
        assert_eq!(selection.axis, 1);
        assert_eq!(selection.direction, 1);
        // the covered centre is left out
        assert_eq!(selection.positions.len(), 8);
        assert!(!selection.positions.contains(&IVec3::ZERO));
        assert_eq!(selection.bound.low, IVec3::new(-1, 0, -1));
        assert_eq!(selection.bound.high, IVec3::new(1, 0, 1));

        // the bottom side is free everywhere
        let bottom = RayHit { face: Some(HitFace { axis: 1, negative: false }), ..top_hit(IVec3::ZERO) };
        let selection = FaceSelection::select(&ag, &bottom).unwrap();
        assert_eq!(selection.positions.len(), 9);
        assert_eq!(selection.direction, -1);
    }

    #[test]
    fn test_face_selection_rejects_covered_or_faceless() {
        let ag = floor();
        assert!(FaceSelection::select(&ag, &top_hit(IVec3::ZERO)).is_none());
        let inside = RayHit { face: None, ..top_hit(IVec3::new(1, 0, 1)) };
        assert!(FaceSelection::select(&ag, &inside).is_none());
    }

    #[test]
    fn test_extrude_positions() {
        let ag = floor();
        let selection = FaceSelection::select(&ag, &top_hit(IVec3::new(1, 0, 1))).unwrap();

        let grow = selection.extrude_positions(0, 2);
        assert_eq!(grow.len(), 16);
        assert!(grow.iter().all(|p| p.y == 1 || p.y == 2));
        assert!(grow.contains(&IVec3::new(-1, 2, -1)));

        let shrink = selection.extrude_positions(3, 1);
        assert_eq!(shrink.len(), 16);
        assert!(shrink.iter().all(|p| p.y == 2 || p.y == 3));

        assert!(selection.extrude_positions(2, 2).is_empty());
        assert_eq!(selection.extrude_positions(-4, 1).len(), 8);
    }
}
