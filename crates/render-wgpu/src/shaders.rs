/// WGSL shader for the textured, five-light cube.
///
/// Light kinds are encoded in `position.w`: 0 directional, 1 hemisphere,
/// 2 ambient, 3 point. `color.a` carries the intensity.
pub const CUBE_SHADER: &str = r#"
struct SceneUniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    camera_pos: vec4<f32>,
}

struct MaterialUniforms {
    base_color: vec4<f32>,
    // x: roughness, y: metalness, zw: normal scale
    params: vec4<f32>,
}

struct LightData {
    position: vec4<f32>,
    color: vec4<f32>,
    ground: vec4<f32>,
}

struct LightsUniform {
    lights: array<LightData, 5>,
}

@group(0) @binding(0)
var<uniform> scene_u: SceneUniforms;
@group(0) @binding(1)
var<uniform> material_u: MaterialUniforms;
@group(0) @binding(2)
var<uniform> lights_u: LightsUniform;

@group(1) @binding(0)
var color_map: texture_2d<f32>;
@group(1) @binding(1)
var roughness_map: texture_2d<f32>;
@group(1) @binding(2)
var normal_map: texture_2d<f32>;
@group(1) @binding(3)
var map_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) tangent: vec3<f32>,
    @location(3) uv: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) world_tangent: vec3<f32>,
    @location(3) uv: vec2<f32>,
}

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = scene_u.model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = scene_u.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = (scene_u.normal_matrix * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.world_tangent = (scene_u.model * vec4<f32>(vertex.tangent, 0.0)).xyz;
    out.uv = vertex.uv;
    return out;
}

fn shade_surface(
    light: LightData,
    l: vec3<f32>,
    n: vec3<f32>,
    v: vec3<f32>,
    base: vec3<f32>,
    roughness: f32,
    metalness: f32,
    attenuation: f32,
) -> vec3<f32> {
    let intensity = light.color.a * attenuation;
    let diffuse = max(dot(n, l), 0.0);
    let h = normalize(l + v);
    let shininess = mix(256.0, 4.0, roughness);
    let spec = pow(max(dot(n, h), 0.0), shininess) * mix(0.04, 1.0, metalness);
    let diffuse_color = base * diffuse * (1.0 - metalness);
    let spec_color = mix(vec3<f32>(1.0), base, metalness) * spec;
    return (diffuse_color + spec_color) * light.color.rgb * intensity;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(color_map, map_sampler, in.uv).rgb
        * material_u.base_color.rgb;
    let roughness = clamp(
        material_u.params.x * textureSample(roughness_map, map_sampler, in.uv).g,
        0.04,
        1.0,
    );
    let metalness = material_u.params.y;

    // Tangent-space normal mapping, scaled per axis.
    var n = normalize(in.world_normal);
    let t = normalize(in.world_tangent - dot(in.world_tangent, n) * n);
    let b = cross(n, t);
    var mapped = textureSample(normal_map, map_sampler, in.uv).xyz * 2.0 - 1.0;
    mapped = vec3<f32>(mapped.xy * material_u.params.zw, mapped.z);
    n = normalize(mat3x3<f32>(t, b, n) * mapped);

    let v = normalize(scene_u.camera_pos.xyz - in.world_pos);

    var shaded = vec3<f32>(0.0);
    for (var i = 0; i < 5; i = i + 1) {
        let light = lights_u.lights[i];
        let kind = light.position.w;

        if (kind == 0.0) {
            // Directional: shines from its position toward the origin.
            let l = normalize(light.position.xyz);
            shaded += shade_surface(light, l, n, v, base, roughness, metalness, 1.0);
        } else if (kind == 1.0) {
            // Hemisphere: blend ground-to-sky by the surface normal.
            let up = 0.5 + 0.5 * n.y;
            let hemi = mix(light.ground.rgb, light.color.rgb, up);
            shaded += base * hemi * light.color.a;
        } else if (kind == 2.0) {
            // Ambient: flat contribution.
            shaded += base * light.color.rgb * light.color.a;
        } else {
            // Point: inverse-square falloff.
            let to_light = light.position.xyz - in.world_pos;
            let dist_sq = max(dot(to_light, to_light), 1.0);
            let l = normalize(to_light);
            shaded += shade_surface(
                light, l, n, v, base, roughness, metalness, 1.0 / dist_sq,
            );
        }
    }

    return vec4<f32>(shaded, 1.0);
}
"#;
