use crate::camera::OrbitCamera;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use matstudio_assets::{TextureImage, TextureKind};
use matstudio_scene::{Light, LightKind, Scene, TextureId};
use std::collections::BTreeMap;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct SceneRaw {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    camera_pos: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct MaterialRaw {
    base_color: [f32; 4],
    /// x: roughness, y: metalness, zw: normal scale.
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LightRaw {
    /// w encodes the kind: 0 directional, 1 hemisphere, 2 ambient, 3 point.
    position: [f32; 4],
    /// a carries the intensity.
    color: [f32; 4],
    ground: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LightsRaw {
    lights: [LightRaw; 5],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    tangent: [f32; 3],
    uv: [f32; 2],
}

fn pack_light(light: &Light) -> LightRaw {
    let (kind, ground) = match light.kind {
        LightKind::Directional => (0.0, [0.0; 3]),
        LightKind::Hemisphere { ground } => (1.0, ground),
        LightKind::Ambient => (2.0, [0.0; 3]),
        LightKind::Point => (3.0, [0.0; 3]),
    };
    LightRaw {
        position: [light.position.x, light.position.y, light.position.z, kind],
        color: [light.color[0], light.color[1], light.color[2], light.intensity],
        ground: [ground[0], ground[1], ground[2], 0.0],
    }
}

fn pack_lights(scene: &Scene) -> LightsRaw {
    let lights = scene.lights.lights();
    LightsRaw {
        lights: [
            pack_light(lights[0]),
            pack_light(lights[1]),
            pack_light(lights[2]),
            pack_light(lights[3]),
            pack_light(lights[4]),
        ],
    }
}

/// Generate a unit cube with per-face normals, tangents, and UVs.
/// The tangent points along the face's +U direction.
fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    let face = |normal: [f32; 3], tangent: [f32; 3], corners: [[f32; 3]; 4]| {
        let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
        corners
            .iter()
            .zip(uvs)
            .map(|(&position, uv)| Vertex {
                position,
                normal,
                tangent,
                uv,
            })
            .collect::<Vec<_>>()
    };

    let mut vertices = Vec::with_capacity(24);
    vertices.extend(face(
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [[-p, -p, p], [p, -p, p], [p, p, p], [-p, p, p]],
    ));
    vertices.extend(face(
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [[p, -p, -p], [-p, -p, -p], [-p, p, -p], [p, p, -p]],
    ));
    vertices.extend(face(
        [1.0, 0.0, 0.0],
        [0.0, 0.0, -1.0],
        [[p, -p, p], [p, -p, -p], [p, p, -p], [p, p, p]],
    ));
    vertices.extend(face(
        [-1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [[-p, -p, -p], [-p, -p, p], [-p, p, p], [-p, p, -p]],
    ));
    vertices.extend(face(
        [0.0, 1.0, 0.0],
        [1.0, 0.0, 0.0],
        [[-p, p, p], [p, p, p], [p, p, -p], [-p, p, -p]],
    ));
    vertices.extend(face(
        [0.0, -1.0, 0.0],
        [1.0, 0.0, 0.0],
        [[-p, -p, -p], [p, -p, -p], [p, -p, p], [-p, -p, p]],
    ));

    let indices: Vec<u16> = (0..6u16)
        .flat_map(|f| {
            let base = f * 4;
            [base, base + 1, base + 2, base + 2, base + 3, base]
        })
        .collect();
    (vertices, indices)
}

/// wgpu renderer for the single studio cube.
pub struct CubeRenderer {
    pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    material_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    texture_bind_group: wgpu::BindGroup,
    /// Maps bound in `texture_bind_group`; rebuilt when the material's
    /// slots change.
    bound_maps: [Option<TextureId>; 3],
    sampler: wgpu::Sampler,
    default_color: wgpu::TextureView,
    default_roughness: wgpu::TextureView,
    default_normal: wgpu::TextureView,
    textures: BTreeMap<TextureId, wgpu::TextureView>,
    next_texture: u64,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    depth_texture: wgpu::TextureView,
}

impl CubeRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_uniforms"),
            contents: bytemuck::bytes_of(&SceneRaw {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                model: Mat4::IDENTITY.to_cols_array_2d(),
                normal_matrix: Mat4::IDENTITY.to_cols_array_2d(),
                camera_pos: [0.0; 4],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("material_uniforms"),
            contents: bytemuck::bytes_of(&MaterialRaw {
                base_color: [1.0; 4],
                params: [1.0, 0.0, 1.0, 1.0],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lights_uniforms"),
            contents: bytemuck::bytes_of(&LightsRaw::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_layout"),
            entries: &[uniform_entry(0), uniform_entry(1), uniform_entry(2)],
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: material_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_layout"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                texture_entry(2),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("map_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            ..Default::default()
        });

        // Neutral stand-ins while a slot is unset: white color, full
        // roughness factor, flat normal.
        let default_color =
            solid_texture(device, queue, "default_color", [255, 255, 255, 255], true);
        let default_roughness =
            solid_texture(device, queue, "default_roughness", [255, 255, 255, 255], false);
        let default_normal =
            solid_texture(device, queue, "default_normal", [128, 128, 255, 255], false);

        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&default_color),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&default_roughness),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&default_normal),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cube_pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::CUBE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cube_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x3,
                        3 => Float32x2,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let (vertices, indices) = cube_mesh();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let index_count = indices.len() as u32;

        let depth_texture = create_depth_texture(device, width, height);

        Self {
            pipeline,
            scene_buffer,
            material_buffer,
            lights_buffer,
            uniform_bind_group,
            texture_layout,
            texture_bind_group,
            bound_maps: [None; 3],
            sampler,
            default_color,
            default_roughness,
            default_normal,
            textures: BTreeMap::new(),
            next_texture: 1,
            vertex_buffer,
            index_buffer,
            index_count,
            depth_texture,
        }
    }

    /// Upload a decoded image and return its handle. The color map is
    /// treated as sRGB; roughness and normal data stay linear.
    pub fn upload_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &TextureImage,
    ) -> TextureId {
        let format = match image.kind {
            TextureKind::Color => wgpu::TextureFormat::Rgba8UnormSrgb,
            TextureKind::Roughness | TextureKind::Normal => wgpu::TextureFormat::Rgba8Unorm,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(image.kind.name()),
            size: wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
        );

        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures
            .insert(id, texture.create_view(&Default::default()));
        tracing::debug!(
            "uploaded {} texture {}x{} as {id:?}",
            image.kind.name(),
            image.width,
            image.height
        );
        id
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = create_depth_texture(device, width, height);
    }

    /// Render one frame from the live scene and camera state.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &OrbitCamera,
        scene: &Scene,
    ) {
        let model = scene.cube.transform.matrix() * Mat4::from_scale(scene.cube.dimensions);
        let camera_pos = camera.position();
        queue.write_buffer(
            &self.scene_buffer,
            0,
            bytemuck::bytes_of(&SceneRaw {
                view_proj: camera.view_projection().to_cols_array_2d(),
                model: model.to_cols_array_2d(),
                normal_matrix: model.inverse().transpose().to_cols_array_2d(),
                camera_pos: [camera_pos.x, camera_pos.y, camera_pos.z, 1.0],
            }),
        );

        let m = &scene.cube.material;
        queue.write_buffer(
            &self.material_buffer,
            0,
            bytemuck::bytes_of(&MaterialRaw {
                base_color: [m.base_color[0], m.base_color[1], m.base_color[2], 1.0],
                params: [m.roughness, m.metalness, m.normal_scale.x, m.normal_scale.y],
            }),
        );

        queue.write_buffer(&self.lights_buffer, 0, bytemuck::bytes_of(&pack_lights(scene)));

        self.bind_material_maps(device, m.color_map, m.roughness_map, m.normal_map);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cube_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.15,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_bind_group(1, &self.texture_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.index_count, 0, 0..1);
        }
        queue.submit(std::iter::once(encoder.finish()));
    }

    /// Rebuild the texture bind group if the material's slots changed
    /// since the last frame. Unset slots bind the neutral defaults.
    fn bind_material_maps(
        &mut self,
        device: &wgpu::Device,
        color: Option<TextureId>,
        roughness: Option<TextureId>,
        normal: Option<TextureId>,
    ) {
        let wanted = [color, roughness, normal];
        if wanted == self.bound_maps {
            return;
        }

        let color_view = color
            .and_then(|id| self.textures.get(&id))
            .unwrap_or(&self.default_color);
        let roughness_view = roughness
            .and_then(|id| self.textures.get(&id))
            .unwrap_or(&self.default_roughness);
        let normal_view = normal
            .and_then(|id| self.textures.get(&id))
            .unwrap_or(&self.default_normal);

        self.texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(roughness_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(normal_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        self.bound_maps = wanted;
    }
}

fn solid_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    rgba: [u8; 4],
    srgb: bool,
) -> wgpu::TextureView {
    let format = if srgb {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4),
            rows_per_image: None,
        },
        wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
    );
    texture.create_view(&Default::default())
}

fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn cube_mesh_has_24_vertices_36_indices() {
        let (vertices, indices) = cube_mesh();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn cube_mesh_frames_are_orthonormal() {
        let (vertices, _) = cube_mesh();
        for v in &vertices {
            let n = Vec3::from(v.normal);
            let t = Vec3::from(v.tangent);
            assert!((n.length() - 1.0).abs() < 1e-6);
            assert!((t.length() - 1.0).abs() < 1e-6);
            assert!(n.dot(t).abs() < 1e-6, "tangent not orthogonal to normal");
        }
    }

    #[test]
    fn cube_mesh_uvs_cover_unit_square() {
        let (vertices, _) = cube_mesh();
        for v in &vertices {
            assert!((0.0..=1.0).contains(&v.uv[0]));
            assert!((0.0..=1.0).contains(&v.uv[1]));
        }
    }

    #[test]
    fn pack_light_encodes_kind_and_intensity() {
        let scene = Scene::studio();
        let raw = pack_lights(&scene);
        // Panel order: key (directional), fill (hemisphere), ambient,
        // rim (point), intense (directional).
        assert_eq!(raw.lights[0].position[3], 0.0);
        assert_eq!(raw.lights[1].position[3], 1.0);
        assert_eq!(raw.lights[2].position[3], 2.0);
        assert_eq!(raw.lights[3].position[3], 3.0);
        assert_eq!(raw.lights[4].position[3], 0.0);
        assert_eq!(raw.lights[4].color[3], 2.5);
        // Hemisphere ground color rides in its own slot.
        assert!(raw.lights[1].ground[0] > 0.0);
    }

    #[test]
    fn uniform_structs_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<SceneRaw>(), 3 * 64 + 16);
        assert_eq!(std::mem::size_of::<MaterialRaw>(), 32);
        assert_eq!(std::mem::size_of::<LightRaw>(), 48);
        assert_eq!(std::mem::size_of::<LightsRaw>(), 240);
    }
}
