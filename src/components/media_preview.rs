use crate::upload::MediaKind;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MediaPreviewProps {
    pub kind: MediaKind,
    pub src: AttrValue,
}

#[function_component(MediaPreview)]
pub fn media_preview(props: &MediaPreviewProps) -> Html {
    match props.kind {
        MediaKind::Image => html! {
            <img class="preview-image" src={props.src.clone()} alt="Preview" />
        },
        MediaKind::Video => html! {
            <div class="preview-video" style="aspect-ratio: 16 / 9">
                <video src={props.src.clone()} controls={true} playsinline={true}></video>
            </div>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yew::LocalServerRenderer;

    async fn render(kind: MediaKind, src: &'static str) -> String {
        LocalServerRenderer::<MediaPreview>::with_props(MediaPreviewProps {
            kind,
            src: src.into(),
        })
        .render()
        .await
    }

    #[tokio::test]
    async fn video_plays_inline_with_controls() {
        let html = render(MediaKind::Video, "data:video/mp4;base64,AAAA").await;
        assert!(html.contains("<video"));
        assert!(html.contains("playsinline"));
        assert!(html.contains("controls"));
        assert!(html.contains("data:video/mp4;base64,AAAA"));
    }

    #[tokio::test]
    async fn image_renders_as_img() {
        let html = render(MediaKind::Image, "data:image/png;base64,iVBORw==").await;
        assert!(html.contains("<img"));
        assert!(html.contains("data:image/png;base64,iVBORw=="));
        assert!(!html.contains("<video"));
    }
}
