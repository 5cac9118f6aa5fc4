//! Chunk tesselation: visible-face quads with corner occlusion and bevel tiles.
//!
//! Each non-empty voxel gets a 26-bit mask of the neighbours that hide it.
//! A face is emitted only when the neighbour across it does not hide it.
//! The same mask drives per-corner occlusion and the normal-map tile of
//! every emitted face.

use bytemuck::{Pod, Zeroable};

use crate::core::types::IVec3;
use super::block::{GRID_LEN, GRID_VOLUME};
use super::grid::{index_pos, VoxelGrid};
use super::voxel::VoxelEntry;

/// Index of the centre chunk / centre cell in a 3x3x3 neighbourhood
pub const SELF_INDEX: usize = 13;

/// Unit cube corners
const VERTEX_POSITIONS: [[i32; 3]; 8] = [
    [0, 0, 0],
    [0, 0, 1],
    [0, 1, 1],
    [0, 1, 0],
    [1, 0, 0],
    [1, 0, 1],
    [1, 1, 1],
    [1, 1, 0],
];

/// Counter-clockwise corners per face, ordered -x, +x, -y, +y, -z, +z
const FACE_VERTICES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [7, 6, 5, 4],
    [0, 4, 5, 1],
    [2, 6, 7, 3],
    [0, 3, 7, 4],
    [5, 6, 2, 1],
];

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Mesh vertex - 20 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct VoxelVertex {
    /// World position of the corner
    pub pos: [f32; 3],
    /// RGBA voxel color
    pub color: [u8; 4],
    /// face * 4 + corner, selects normal and uv in the shader
    pub attrib_index: u8,
    /// Shader material table index, see [`VoxelEntry::material_index`]
    pub material_index: u8,
    /// Bevel tile 0..15, one bit per exposed edge (-u, +u, -v, +v)
    pub normal_tile: u8,
    /// Corner darkening 0..2
    pub occlusion: u8,
}

/// Caller-owned output of one tesselation call.
///
/// Opaque quads come first, then transparent ones. Reused across calls to
/// avoid reallocating.
#[derive(Clone, Debug, Default)]
pub struct ChunkMesh {
    pub vertices: Vec<VoxelVertex>,
    /// Triangles in the opaque and transparent pass
    pub tri_counts: [usize; 2],
}

impl ChunkMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.tri_counts = [0; 2];
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn opaque_vertices(&self) -> &[VoxelVertex] {
        &self.vertices[..self.tri_counts[0] * 2]
    }

    pub fn transparent_vertices(&self) -> &[VoxelVertex] {
        &self.vertices[self.tri_counts[0] * 2..]
    }
}

/// Index list for `quad_count` quads laid out as 4 vertices each.
pub fn quad_indices(quad_count: usize) -> Vec<u32> {
    (0..quad_count * 6)
        .map(|i| (i / 6 * 4) as u32 + QUAD_INDICES[i % 6])
        .collect()
}

/// Offset of neighbour `n` (x fastest, then y, then z)
#[inline]
fn neighbour_offset(n: usize) -> IVec3 {
    let n = n as i32;
    IVec3::new(n % 3 - 1, (n / 3) % 3 - 1, n / 9 - 1)
}

#[inline]
fn neighbour_index(d: IVec3) -> usize {
    ((d.z + 1) * 9 + (d.y + 1) * 3 + (d.x + 1)) as usize
}

/// Bit of neighbour `n` in a 26-bit mask (the centre has no bit)
#[inline]
fn mask_bit(n: usize) -> u32 {
    debug_assert_ne!(n, SELF_INDEX);
    1 << if n > SELF_INDEX { n - 1 } else { n }
}

#[inline]
fn mask_has(mask: u32, d: IVec3) -> bool {
    mask & mask_bit(neighbour_index(d)) != 0
}

/// Whether `neighbour` hides the faces of `voxel` that touch it.
///
/// Opaque neighbours hide everything. A transparent neighbour only hides
/// another transparent voxel, so glass never masks solid faces behind it.
#[inline]
fn hides(voxel: &VoxelEntry, neighbour: &VoxelEntry) -> bool {
    neighbour.is_non_empty() && (voxel.is_transparent() || !neighbour.is_transparent())
}

/// Entry at a position relative to `grid`, reaching into the surrounding
/// chunks for positions one step outside it.
fn lookup(grid: &VoxelGrid, neighbours: &[Option<&VoxelGrid>; 27], p: IVec3) -> Option<VoxelEntry> {
    if let Some(v) = grid.voxel(p) {
        return Some(*v);
    }
    let chunk = p.div_euclid(IVec3::splat(GRID_LEN));
    let other = neighbours[neighbour_index(chunk)]?;
    other.voxel(p - chunk * GRID_LEN).copied()
}

/// Per-voxel occlusion masks for every non-empty voxel in `grid`; empty
/// voxels get 0. `neighbours` is the 3x3x3 chunk block around `grid`.
pub fn neighbour_masks(grid: &VoxelGrid, neighbours: &[Option<&VoxelGrid>; 27]) -> Vec<u32> {
    let mut masks = vec![0u32; GRID_VOLUME];
    for (index, voxel) in grid.voxels().iter().enumerate() {
        if !voxel.is_non_empty() {
            continue;
        }
        let pos = index_pos(index);
        let mut mask = 0;
        for n in (0..27).filter(|&n| n != SELF_INDEX) {
            if lookup(grid, neighbours, pos + neighbour_offset(n)).is_some_and(|other| hides(voxel, &other)) {
                mask |= mask_bit(n);
            }
        }
        masks[index] = mask;
    }
    masks
}

/// Mask of the 8 neighbours in the plane perpendicular to `axis`
fn in_plane_mask(axis: usize) -> u32 {
    (0..27)
        .filter(|&n| n != SELF_INDEX && neighbour_offset(n)[axis] == 0)
        .fold(0, |mask, n| mask | mask_bit(n))
}

struct FaceFrame {
    normal: IVec3,
    u: IVec3,
    v: IVec3,
}

fn face_frame(face: usize) -> FaceFrame {
    let axis = face / 2;
    let mut normal = IVec3::ZERO;
    normal[axis] = if face % 2 == 1 { 1 } else { -1 };
    let mut u = IVec3::ZERO;
    u[(axis + 1) % 3] = 1;
    let mut v = IVec3::ZERO;
    v[(axis + 2) % 3] = 1;
    FaceFrame { normal, u, v }
}

/// Edges of the face whose in-plane neighbour is missing and not covered
/// from the front either.
fn normal_tile(mask: u32, frame: &FaceFrame) -> u8 {
    let edges = [-frame.u, frame.u, -frame.v, frame.v];
    edges.iter().enumerate().fold(0u8, |tile, (bit, &t)| {
        if !mask_has(mask, t) && !mask_has(mask, frame.normal + t) {
            tile | 1 << bit
        } else {
            tile
        }
    })
}

/// Number of occupied cells touching this corner in front of the face
fn corner_occlusion(mask: u32, frame: &FaceFrame, corner: IVec3) -> u8 {
    let su = if corner.dot(frame.u) == 1 { frame.u } else { -frame.u };
    let sv = if corner.dot(frame.v) == 1 { frame.v } else { -frame.v };
    let side1 = mask_has(mask, frame.normal + su) as u8;
    let side2 = mask_has(mask, frame.normal + sv) as u8;
    let diagonal = mask_has(mask, frame.normal + su + sv) as u8;
    (side1 + side2 + diagonal).min(2)
}

fn emit_face(mesh: &mut ChunkMesh, world: IVec3, voxel: &VoxelEntry, mask: u32, face: usize) {
    let frame = face_frame(face);
    let normal_tile = normal_tile(mask, &frame);
    let material_index = voxel.material_index();
    for (i, &corner) in FACE_VERTICES[face].iter().enumerate() {
        let corner = IVec3::from_array(VERTEX_POSITIONS[corner]);
        mesh.vertices.push(VoxelVertex {
            pos: (world + corner).as_vec3().to_array(),
            color: voxel.color,
            attrib_index: (face * 4 + i) as u8,
            material_index,
            normal_tile,
            occlusion: corner_occlusion(mask, &frame, corner),
        });
    }
}

impl VoxelGrid {
    /// Tesselate every visible face into `mesh`, which is cleared first.
    pub fn tesselate(&self, mesh: &mut ChunkMesh, neighbours: &[Option<&VoxelGrid>; 27]) {
        self.tesselate_filtered(mesh, neighbours, None);
    }

    /// Tesselate only the voxels whose world coordinate on `axis` is `level`.
    /// Neighbours in front of and behind the slice are ignored, so the
    /// slice always shows both of its sides.
    pub fn tesselate_slice(
        &self,
        mesh: &mut ChunkMesh,
        neighbours: &[Option<&VoxelGrid>; 27],
        axis: usize,
        level: i32,
    ) {
        self.tesselate_filtered(mesh, neighbours, Some((axis, level)));
    }

    fn tesselate_filtered(
        &self,
        mesh: &mut ChunkMesh,
        neighbours: &[Option<&VoxelGrid>; 27],
        slice: Option<(usize, i32)>,
    ) {
        mesh.clear();
        let local_level = match slice {
            Some((axis, level)) => {
                let local = level - self.origin()[axis];
                if !(0..GRID_LEN).contains(&local) {
                    return;
                }
                Some((axis, local))
            }
            None => None,
        };
        let masks = neighbour_masks(self, neighbours);
        let slice_mask = local_level.map_or(u32::MAX, |(axis, _)| in_plane_mask(axis));

        for (pass, transparent) in [false, true].into_iter().enumerate() {
            let start = mesh.vertices.len();
            for (index, voxel) in self.voxels().iter().enumerate() {
                if !voxel.is_non_empty() || voxel.is_transparent() != transparent {
                    continue;
                }
                let pos = index_pos(index);
                if local_level.is_some_and(|(axis, local)| pos[axis] != local) {
                    continue;
                }
                let mask = masks[index] & slice_mask;
                let world = self.origin() + pos;
                for face in 0..6 {
                    if !mask_has(mask, face_frame(face).normal) {
                        emit_face(mesh, world, voxel, mask, face);
                    }
                }
            }
            mesh.tri_counts[pass] = (mesh.vertices.len() - start) / 4 * 2;
        }
        log::trace!(
            "tesselated grid {:?}: {} opaque / {} transparent triangles",
            self.origin(),
            mesh.tri_counts[0],
            mesh.tri_counts[1]
        );
    }
}
