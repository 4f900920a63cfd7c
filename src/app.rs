use crate::components::{submit::SubmitButton, upload::Upload};
use crate::form::{Binder, FieldRules, FormBinder, FormState};
use crate::upload::{MediaKind, Rejection};
use gloo::console::{error, log};
use gloo::events::{EventListener, EventListenerOptions};
use web_sys::{File, Url};
use yew::html::Scope;
use yew::prelude::*;

const COURSE_IMAGE: &str = "courseImage";
const INTRO_VIDEO: &str = "introVideo";

/// Course-creation form hosting the upload widgets.
pub struct CourseForm {
    form: FormState,
    binder: Binder,
    published: Option<Published>,
    // Bumped on reset so the editable widgets remount empty.
    generation: u64,
    logs: Vec<String>,
    _drop_guards: Vec<EventListener>,
}

/// Object URLs of the last saved course, shown read-only.
struct Published {
    image_url: String,
    video_url: String,
}

impl Published {
    fn revoke(&self) {
        for url in [&self.image_url, &self.video_url] {
            if let Err(e) = Url::revoke_object_url(url) {
                error!(format!("Failed to revoke {}: {:?}", url, e));
            }
        }
    }
}

pub enum Msg {
    Register(String, FieldRules),
    SetValue(String, Option<File>),
    Rejected(&'static str, Rejection),
    Save,
    Reset,
    AddLog(String),
}

/// Stops files dropped outside a drop target from navigating the page away
/// from the form.
fn guard_document_drops() -> Vec<EventListener> {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        error!("No document available, stray drops are not guarded");
        return Vec::new();
    };

    ["dragover", "drop"]
        .into_iter()
        .map(|event| {
            EventListener::new_with_options(
                &document,
                event,
                EventListenerOptions::enable_prevent_default(),
                |e| e.prevent_default(),
            )
        })
        .collect()
}

impl FormBinder for Scope<CourseForm> {
    fn register(&self, name: &str, rules: FieldRules) {
        self.send_message(Msg::Register(name.to_string(), rules));
    }

    fn set_value(&self, name: &str, value: Option<File>) {
        self.send_message(Msg::SetValue(name.to_string(), value));
    }
}

impl Component for CourseForm {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            form: FormState::new(),
            binder: Binder::new(ctx.link().clone()),
            published: None,
            generation: 0,
            logs: vec!["Course editor ready".to_string()],
            _drop_guards: guard_document_drops(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Register(name, rules) => {
                if self.form.register(&name, rules) {
                    self.add_log(ctx, format!("Field registered: {} (required: {})", name, rules.required));
                }
                false
            }
            Msg::SetValue(name, value) => {
                match &value {
                    Some(file) => self.add_log(ctx, format!("{} set to {}", name, file.name())),
                    None => self.add_log(ctx, format!("{} cleared", name)),
                }
                self.form.set_value(&name, value);
                true
            }
            Msg::Rejected(field, rejection) => {
                self.add_log(ctx, format!("{}: {}", field, rejection));
                false
            }
            Msg::Save => {
                if !self.form.validate() {
                    let missing = self.form.errors().field_names().collect::<Vec<_>>().join(", ");
                    self.add_log(ctx, format!("Cannot save, missing: {}", missing));
                    return true;
                }

                match self.publish() {
                    Ok(published) => {
                        if let Some(previous) = self.published.replace(published) {
                            previous.revoke();
                        }
                        self.add_log(ctx, "Course saved".to_string());
                    }
                    Err(e) => {
                        error!(format!("Failed to publish course media: {:?}", e));
                        self.add_log(ctx, "Error: could not prepare saved media".to_string());
                    }
                }
                true
            }
            Msg::Reset => {
                if let Some(published) = self.published.take() {
                    published.revoke();
                }
                self.form.reset();
                self.generation += 1;
                self.add_log(ctx, "Form reset".to_string());
                true
            }
            Msg::AddLog(entry) => {
                self.logs.push(entry);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let errors = self.form.errors().clone();

        html! {
            <div class="app-container">
                <header>
                    <h1>{ "Create Course" }</h1>
                </header>

                <main>
                    <div class="panel">
                        <h2>{ "Course Media" }</h2>
                        <Upload
                            key={format!("{}-{}", COURSE_IMAGE, self.generation)}
                            name={COURSE_IMAGE}
                            label="Course Thumbnail"
                            binder={self.binder.clone()}
                            errors={errors.clone()}
                            kind={MediaKind::Image}
                            on_reject={link.callback(|r: Rejection| Msg::Rejected(COURSE_IMAGE, r))}
                        />
                        <Upload
                            key={format!("{}-{}", INTRO_VIDEO, self.generation)}
                            name={INTRO_VIDEO}
                            label="Intro Video"
                            binder={self.binder.clone()}
                            errors={errors.clone()}
                            kind={MediaKind::Video}
                            on_reject={link.callback(|r: Rejection| Msg::Rejected(INTRO_VIDEO, r))}
                        />

                        <div class="button-container">
                            <SubmitButton label="Save Course" on_submit={link.callback(|_: ()| Msg::Save)} />
                            <button type="button" class="reset-button" onclick={link.callback(|_| Msg::Reset)}>
                                { "Reset" }
                            </button>
                        </div>
                    </div>

                    {
                        if let Some(published) = &self.published {
                            html! {
                                <div class="panel">
                                    <h2>{ "Saved Course" }</h2>
                                    <Upload
                                        key={published.image_url.clone()}
                                        name="savedImage"
                                        label="Course Thumbnail"
                                        binder={self.binder.clone()}
                                        errors={errors.clone()}
                                        kind={MediaKind::Image}
                                        view_data={AttrValue::from(published.image_url.clone())}
                                    />
                                    <Upload
                                        key={published.video_url.clone()}
                                        name="savedVideo"
                                        label="Intro Video"
                                        binder={self.binder.clone()}
                                        errors={errors.clone()}
                                        kind={MediaKind::Video}
                                        view_data={AttrValue::from(published.video_url.clone())}
                                    />
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }

                    <div class="panel">
                        <h2>{ "Logs" }</h2>
                        <div class="logs-container">
                            {
                                for self.logs.iter().map(|entry| {
                                    html! { <div class="log-entry">{ entry }</div> }
                                })
                            }
                        </div>
                    </div>
                </main>
            </div>
        }
    }
}

impl CourseForm {
    fn publish(&self) -> Result<Published, wasm_bindgen::JsValue> {
        let image_url = self.object_url(COURSE_IMAGE)?;
        let video_url = match self.object_url(INTRO_VIDEO) {
            Ok(url) => url,
            Err(e) => {
                if let Err(revoke) = Url::revoke_object_url(&image_url) {
                    error!(format!("Failed to revoke {}: {:?}", image_url, revoke));
                }
                return Err(e);
            }
        };
        log!(format!("Published media at {} and {}", image_url, video_url));
        Ok(Published { image_url, video_url })
    }

    fn object_url(&self, field: &str) -> Result<String, wasm_bindgen::JsValue> {
        let file = self
            .form
            .value(field)
            .ok_or_else(|| wasm_bindgen::JsValue::from_str(&format!("{} has no value", field)))?;
        Url::create_object_url_with_blob(file)
    }

    fn add_log(&mut self, ctx: &Context<Self>, message: String) {
        let timestamp = js_sys::Date::new_0().to_locale_time_string("en-US");
        let log_entry = format!("[{}] {}", timestamp, message);
        ctx.link().send_message(Msg::AddLog(log_entry));
    }
}
