use blade_graphics as gpu;

use std::{mem, ptr};

use crate::label::LabelAtlas;
use crate::mesh::{DieMesh, EdgeVertex, Vertex};

/// GPU-resident form of the assembled die: vertex and edge buffers plus the
/// label atlas texture. Created once; the render loop only reads it.
pub struct Die {
    pub vertex_buf: gpu::Buffer,
    pub edge_buf: gpu::Buffer,
    atlas_texture: gpu::Texture,
    pub atlas_view: gpu::TextureView,
    pub sampler: gpu::Sampler,
    pub vertex_count: u32,
    pub edge_vertex_count: u32,
}

impl Die {
    pub fn new(
        mesh: &DieMesh,
        atlas: &LabelAtlas,
        context: &gpu::Context,
        encoder: &mut gpu::CommandEncoder,
    ) -> Self {
        let vertex_size = (mesh.vertices.len() * mem::size_of::<Vertex>()) as u64;
        let edge_size = (mesh.edge_vertices.len() * mem::size_of::<EdgeVertex>()) as u64;
        let vertex_buf = context.create_buffer(gpu::BufferDesc {
            name: "die-vertices",
            size: vertex_size,
            memory: gpu::Memory::Device,
        });
        let edge_buf = context.create_buffer(gpu::BufferDesc {
            name: "die-edges",
            size: edge_size,
            memory: gpu::Memory::Device,
        });
        let mesh_stage = context.create_buffer(gpu::BufferDesc {
            name: "die-mesh-stage",
            size: vertex_size + edge_size,
            memory: gpu::Memory::Upload,
        });
        unsafe {
            ptr::copy_nonoverlapping(
                mesh.vertices.as_ptr(),
                mesh_stage.data() as *mut Vertex,
                mesh.vertices.len(),
            );
            ptr::copy_nonoverlapping(
                mesh.edge_vertices.as_ptr(),
                mesh_stage.data().add(vertex_size as usize) as *mut EdgeVertex,
                mesh.edge_vertices.len(),
            );
        }

        let extent = gpu::Extent {
            width: atlas.width(),
            height: atlas.height(),
            depth: 1,
        };
        let atlas_texture = context.create_texture(gpu::TextureDesc {
            name: "label-atlas",
            format: gpu::TextureFormat::Rgba8UnormSrgb,
            size: extent,
            array_layer_count: 1,
            mip_level_count: 1,
            dimension: gpu::TextureDimension::D2,
            usage: gpu::TextureUsage::COPY | gpu::TextureUsage::RESOURCE,
            sample_count: 1,
        });
        let atlas_view = context.create_texture_view(
            atlas_texture,
            gpu::TextureViewDesc {
                name: "label-atlas",
                format: gpu::TextureFormat::Rgba8UnormSrgb,
                dimension: gpu::ViewDimension::D2,
                subresources: &gpu::TextureSubresources::default(),
            },
        );
        let sampler = context.create_sampler(gpu::SamplerDesc {
            name: "label-atlas",
            address_modes: [gpu::AddressMode::ClampToEdge; 3],
            mag_filter: gpu::FilterMode::Linear,
            min_filter: gpu::FilterMode::Linear,
            ..Default::default()
        });

        let atlas_data = atlas.data();
        let atlas_stage = context.create_buffer(gpu::BufferDesc {
            name: "label-atlas-stage",
            size: atlas_data.len() as u64,
            memory: gpu::Memory::Upload,
        });
        unsafe {
            ptr::copy_nonoverlapping(atlas_data.as_ptr(), atlas_stage.data(), atlas_data.len());
        }

        log::info!(
            "uploading {} die vertices, {} edge endpoints and a {}x{} label atlas",
            mesh.vertices.len(),
            mesh.edge_vertices.len(),
            atlas.width(),
            atlas.height()
        );

        // Encode init operations
        encoder.start();
        encoder.init_texture(atlas_texture);
        if let mut pass = encoder.transfer("init") {
            pass.copy_buffer_to_buffer(mesh_stage.at(0), vertex_buf.at(0), vertex_size);
            pass.copy_buffer_to_buffer(mesh_stage.at(vertex_size), edge_buf.at(0), edge_size);
            pass.copy_buffer_to_texture(
                atlas_stage.at(0),
                atlas.width() * 4,
                atlas_texture.into(),
                extent,
            );
        }
        let sync_point = context.submit(encoder);
        context.wait_for(&sync_point, !0);

        context.destroy_buffer(mesh_stage);
        context.destroy_buffer(atlas_stage);

        Self {
            vertex_buf,
            edge_buf,
            atlas_texture,
            atlas_view,
            sampler,
            vertex_count: mesh.vertices.len() as u32,
            edge_vertex_count: mesh.edge_vertices.len() as u32,
        }
    }

    pub fn deinit(&mut self, context: &gpu::Context) {
        context.destroy_buffer(self.vertex_buf);
        context.destroy_buffer(self.edge_buf);
        context.destroy_texture_view(self.atlas_view);
        context.destroy_texture(self.atlas_texture);
        context.destroy_sampler(self.sampler);
    }
}
