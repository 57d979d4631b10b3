use gallery_core::render::helpers;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Wait until `img` is loaded and decoded; returns its natural size.
pub async fn decode_image(img: &web::HtmlImageElement) -> anyhow::Result<(u32, u32)> {
    JsFuture::from(img.decode())
        .await
        .map_err(|e| anyhow::anyhow!("decode failed for {}: {:?}", img.src(), e))?;
    let width = img.natural_width();
    let height = img.natural_height();
    if width == 0 || height == 0 {
        anyhow::bail!("{} decoded to an empty image", img.src());
    }
    Ok((width, height))
}

/// Copy a decoded image into a fresh sRGB texture.
pub fn upload_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    img: &web::HtmlImageElement,
    (width, height): (u32, u32),
) -> wgpu::Texture {
    // copyExternalImageToTexture needs RENDER_ATTACHMENT on the destination
    let (texture, _view) = helpers::create_texture(
        device,
        "image_tex",
        width,
        height,
        helpers::COLOR_FORMAT,
        wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::RENDER_ATTACHMENT,
    );
    queue.copy_external_image_to_texture(
        &wgpu::CopyExternalImageSourceInfo {
            source: wgpu::ExternalImageSource::HTMLImageElement(img.clone()),
            origin: wgpu::Origin2d::ZERO,
            flip_y: false,
        },
        wgpu::CopyExternalImageDestInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
            color_space: wgpu::PredefinedColorSpace::Srgb,
            premultiplied_alpha: false,
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    log::info!("[texture] {} uploaded ({}x{})", img.src(), width, height);
    texture
}
