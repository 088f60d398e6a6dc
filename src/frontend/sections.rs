use super::{
    document_height, prefers_reduced_motion, scroll_to_section, scroll_y, sleep_ms, use_reveal,
    viewport_size, AnimationFrameLoop, WindowListener,
};
use crate::{
    contact::{ContactField, ContactForm, SubmitStatus},
    content::{SiteContent, SocialLink},
    motion::{hero_zoom, scroll_fraction, spotlight_background, ScrollSpring},
    pursuit::Point,
    telemetry::{log_event, LogLevel},
};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

const NAV_SCROLLED_THRESHOLD_PX: f64 = 50.0;
const NAV_LINKS: [(&str, &str); 6] = [
    ("hero", "Home"),
    ("about", "About"),
    ("skills", "Skills"),
    ("projects", "Projects"),
    ("blog", "Blog"),
    ("contact", "Contact"),
];

#[derive(Properties, PartialEq)]
pub struct SectionProps {
    pub content: Rc<SiteContent>,
}

#[derive(Properties, PartialEq)]
struct ExternalLinkProps {
    href: AttrValue,
    label: AttrValue,
    #[prop_or_default]
    class: Classes,
    #[prop_or_default]
    children: Html,
}

#[function_component(ExternalLink)]
fn external_link(props: &ExternalLinkProps) -> Html {
    html! {
        <a
            class={classes!("link", props.class.clone())}
            href={props.href.clone()}
            target="_blank"
            rel="noopener noreferrer"
            aria-label={props.label.clone()}
        >
            {props.children.clone()}
            <span class="sr-only">{" (opens in a new tab)"}</span>
        </a>
    }
}

fn social_links<'a>(socials: impl Iterator<Item = &'a SocialLink>, class: &'static str) -> Html {
    socials
        .map(|social| {
            html! {
                <ExternalLink
                    href={AttrValue::from(social.url.clone())}
                    label={AttrValue::from(social.name.clone())}
                    class={classes!(class)}
                >
                    <span aria-hidden="true">{social.glyph.clone()}</span>
                </ExternalLink>
            }
        })
        .collect()
}

fn scroll_link(target: &'static str) -> Callback<MouseEvent> {
    Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        scroll_to_section(target);
    })
}

fn quantized_progress(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[function_component(ScrollProgress)]
pub fn scroll_progress() -> Html {
    let progress = use_state_eq(|| 0.0_f64);

    {
        let progress = progress.clone();
        use_effect_with((), move |_| {
            let reduced = prefers_reduced_motion();
            let current_fraction = || {
                let (_, viewport_height) = viewport_size();
                scroll_fraction(scroll_y(), document_height(), viewport_height)
            };

            let spring = Rc::new(RefCell::new(ScrollSpring::default()));
            let mut frames = AnimationFrameLoop::default();

            if reduced {
                progress.set(quantized_progress(current_fraction()));
            } else {
                spring.borrow_mut().set_target(current_fraction());

                let spring = spring.clone();
                let progress = progress.clone();
                let mut last_frame: Option<f64> = None;
                frames.start_while(move |now_ms| {
                    let elapsed = last_frame.map(|last| now_ms - last).unwrap_or(0.0);
                    let value = spring.borrow_mut().step(elapsed);
                    progress.set(quantized_progress(value));

                    let moving = !spring.borrow().is_resting();
                    last_frame = moving.then_some(now_ms);
                    moving
                });
            }

            let listener = {
                let waker = frames.waker();
                WindowListener::new("scroll", move |_| {
                    let fraction = current_fraction();
                    if reduced {
                        progress.set(quantized_progress(fraction));
                    } else if spring.borrow_mut().set_target(fraction) {
                        waker.wake();
                    }
                })
            };

            move || {
                drop(frames);
                drop(listener);
            }
        });
    }

    html! {
        <div
            class="scroll-progress"
            style={format!("transform: scaleX({:.4});", *progress)}
            aria-hidden="true"
        ></div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NavigationProps {
    pub name: AttrValue,
}

#[function_component(Navigation)]
pub fn navigation(props: &NavigationProps) -> Html {
    let scrolled = use_state_eq(|| false);
    let menu_open = use_state_eq(|| false);

    {
        let scrolled = scrolled.clone();
        use_effect_with((), move |_| {
            scrolled.set(scroll_y() > NAV_SCROLLED_THRESHOLD_PX);
            let listener = WindowListener::new("scroll", move |_| {
                scrolled.set(scroll_y() > NAV_SCROLLED_THRESHOLD_PX);
            });
            move || drop(listener)
        });
    }

    let on_toggle = {
        let menu_open = menu_open.clone();
        Callback::from(move |_| menu_open.set(!*menu_open))
    };

    let links = NAV_LINKS
        .iter()
        .map(|&(id, label)| {
            let menu_open = menu_open.clone();
            let onclick = Callback::from(move |event: MouseEvent| {
                event.prevent_default();
                scroll_to_section(id);
                menu_open.set(false);
            });
            html! {
                <li><a href={format!("#{id}")} {onclick}>{label}</a></li>
            }
        })
        .collect::<Html>();

    html! {
        <header class={classes!("site-nav", (*scrolled).then_some("is-scrolled"))}>
            <nav aria-label="Primary">
                <a class="brand" href="#hero" onclick={scroll_link("hero")}>
                    {props.name.clone()}
                </a>
                <button
                    class="menu-toggle"
                    type="button"
                    aria-label="Toggle navigation"
                    aria-expanded={(*menu_open).to_string()}
                    onclick={on_toggle}
                >
                    <span aria-hidden="true">{if *menu_open { "✕" } else { "☰" }}</span>
                </button>
                <ul class={classes!("nav-links", (*menu_open).then_some("is-open"))}>
                    {links}
                </ul>
            </nav>
        </header>
    }
}

#[function_component(HeroSection)]
pub fn hero_section(props: &SectionProps) -> Html {
    let pointer = use_state_eq(Point::default);
    let scroll = use_state_eq(|| 0.0_f64);
    let profile = &props.content.profile;

    {
        let pointer = pointer.clone();
        let scroll = scroll.clone();
        use_effect_with((), move |_| {
            let pointer_listener = WindowListener::new("mousemove", move |event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    pointer.set(Point::new(
                        f64::from(mouse.client_x()),
                        f64::from(mouse.client_y()),
                    ));
                }
            });
            let scroll_listener = WindowListener::new("scroll", move |_| scroll.set(scroll_y()));

            move || {
                drop(pointer_listener);
                drop(scroll_listener);
            }
        });
    }

    let (_, viewport_height) = viewport_size();
    let zoom = hero_zoom(*scroll, viewport_height);

    html! {
        <section id="hero" class="hero">
            <div class="hero-spotlight" style={spotlight_background(*pointer)} aria-hidden="true"></div>
            <div class="hero-grid" aria-hidden="true"></div>

            <div class="hero-inner" style={zoom.style()}>
                <h1 class="hero-tagline">
                    { for profile.tagline.iter().enumerate().map(|(index, line)| html! {
                        <span class={classes!("tagline-line", (index % 2 == 0).then_some("gradient-text"))}>
                            {line.clone()}
                        </span>
                    }) }
                </h1>
                <p class="hero-subtitle">{profile.subtitle.clone()}</p>

                <div class="glass-card identity-card">
                    <h2>{profile.name.clone()}</h2>
                    <p class="accent">{profile.headline.clone()}</p>
                </div>

                <div class="hero-actions">
                    <button class="button button-primary" type="button" onclick={scroll_link("projects")}>
                        {"View Projects"}
                    </button>
                    <ExternalLink
                        href={AttrValue::from(profile.resume_url.clone())}
                        label="Download Resume"
                        class={classes!("button", "button-outline")}
                    >
                        {"Download Resume"}
                    </ExternalLink>
                </div>

                <div class="hero-socials">
                    {social_links(props.content.hero_socials(), "social-pill")}
                </div>
            </div>

            <a class="scroll-hint" href="#about" onclick={scroll_link("about")}>
                <span>{"Scroll to explore"}</span>
                <span aria-hidden="true">{"↓"}</span>
            </a>

            <span class="hero-dot dot-purple" aria-hidden="true"></span>
            <span class="hero-dot dot-pink" aria-hidden="true"></span>
        </section>
    }
}

#[function_component(AboutSection)]
pub fn about_section(props: &SectionProps) -> Html {
    let (reveal_ref, revealed) = use_reveal();
    let about = &props.content.about;

    html! {
        <section
            id="about"
            ref={reveal_ref}
            class={classes!("section-block", "section-about", "reveal", revealed.then_some("is-visible"))}
            aria-labelledby="about-heading"
        >
            <header class="section-header">
                <h2 id="about-heading" class="gradient-text">{"About Me"}</h2>
                <p>{about.intro.clone()}</p>
            </header>

            <div class="two-column">
                <div class="glass-card">
                    <h3>{"My Journey"}</h3>
                    { for about.journey.iter().map(|paragraph| html! { <p>{paragraph.clone()}</p> }) }
                </div>

                <div class="stack">
                    <div class="glass-card">
                        <h3>{"Education"}</h3>
                        { for about.education.iter().map(|entry| html! {
                            <div class={classes!("education-entry", format!("accent-{}", entry.accent))}>
                                <h4>{entry.degree.clone()}</h4>
                                <p class="accent">{entry.field.clone()}</p>
                                <p class="muted">{entry.institution.clone()}</p>
                                <p class="status">{entry.status.clone()}</p>
                            </div>
                        }) }
                    </div>

                    <div class="glass-card">
                        <h3>{"What Drives Me"}</h3>
                        <ul class="value-grid">
                            { for about.values.iter().map(|value| html! { <li>{value.clone()}</li> }) }
                        </ul>
                    </div>
                </div>
            </div>
        </section>
    }
}

#[function_component(SkillsSection)]
pub fn skills_section(props: &SectionProps) -> Html {
    let (reveal_ref, revealed) = use_reveal();
    let skills = &props.content.skills;

    html! {
        <section
            id="skills"
            ref={reveal_ref}
            class={classes!("section-block", "section-skills", "reveal", revealed.then_some("is-visible"))}
            aria-labelledby="skills-heading"
        >
            <header class="section-header">
                <h2 id="skills-heading" class="gradient-text">{"Skills & Expertise"}</h2>
                <p>{skills.intro.clone()}</p>
            </header>

            <div class="card-grid">
                { for skills.categories.iter().map(|category| html! {
                    <article class="glass-card skill-card">
                        <div class="skill-card-header">
                            <span class={classes!("skill-icon", format!("gradient-{}", category.gradient))} aria-hidden="true">
                                {category.icon.clone()}
                            </span>
                            <h3>{category.title.clone()}</h3>
                        </div>
                        <ul class="skill-list">
                            { for category.skills.iter().map(|skill| html! {
                                <li>
                                    <span class="skill-glyph" aria-hidden="true">{skill.icon.clone()}</span>
                                    {skill.name.clone()}
                                </li>
                            }) }
                        </ul>
                    </article>
                }) }
            </div>

            <div class="extra-skills">
                <h3>{"Additional Technologies & Tools"}</h3>
                <ul class="tag-cloud">
                    { for skills.extra.iter().enumerate().map(|(index, tech)| html! {
                        <li class="tag" style={format!("--reveal-delay: {:.2}s;", index as f64 * 0.05)}>
                            {tech.clone()}
                        </li>
                    }) }
                </ul>
            </div>
        </section>
    }
}

#[function_component(ProjectsSection)]
pub fn projects_section(props: &SectionProps) -> Html {
    let (reveal_ref, revealed) = use_reveal();
    let projects = &props.content.projects;

    html! {
        <section
            id="projects"
            ref={reveal_ref}
            class={classes!("section-block", "section-projects", "reveal", revealed.then_some("is-visible"))}
            aria-labelledby="projects-heading"
        >
            <header class="section-header">
                <h2 id="projects-heading" class="gradient-text">{"Featured Projects"}</h2>
                <p>{projects.intro.clone()}</p>
            </header>

            <div class="card-grid">
                { for projects.items.iter().map(|project| html! {
                    <article class="glass-card project-card">
                        <div class="project-media">
                            <img src={project.image.clone()} alt={project.title.clone()} loading="lazy" />
                            <span class={classes!("badge", "badge-status", project.status_class())}>
                                {project.status.clone()}
                            </span>
                            <span class="badge badge-category">{project.category.clone()}</span>
                        </div>
                        <div class="project-copy">
                            <h3>{project.title.clone()}</h3>
                            <p>{project.description.clone()}</p>
                            <ul class="tech-list">
                                { for project.technologies.iter().map(|tech| html! { <li>{tech.clone()}</li> }) }
                            </ul>
                            <div class="project-actions">
                                <ExternalLink
                                    href={AttrValue::from(project.github.clone())}
                                    label={AttrValue::from(format!("{} source code", project.title))}
                                    class={classes!("button", "button-dark")}
                                >
                                    {"Code"}
                                </ExternalLink>
                                <ExternalLink
                                    href={AttrValue::from(project.demo.clone())}
                                    label={AttrValue::from(format!("{} demo", project.title))}
                                    class={classes!("button", "button-primary")}
                                >
                                    {"Demo"}
                                </ExternalLink>
                            </div>
                        </div>
                    </article>
                }) }
            </div>

            <div class="section-cta">
                <p>{"Want to see more? Check out my GitHub for additional projects and contributions."}</p>
                <ExternalLink
                    href={AttrValue::from(projects.github_profile.clone())}
                    label="View all projects on GitHub"
                    class={classes!("button", "button-gradient")}
                >
                    {"View All Projects on GitHub"}
                </ExternalLink>
            </div>
        </section>
    }
}

#[function_component(BlogSection)]
pub fn blog_section(props: &SectionProps) -> Html {
    let (reveal_ref, revealed) = use_reveal();
    let blog = &props.content.blog;

    html! {
        <section
            id="blog"
            ref={reveal_ref}
            class={classes!("section-block", "section-blog", "reveal", revealed.then_some("is-visible"))}
            aria-labelledby="blog-heading"
        >
            <header class="section-header">
                <h2 id="blog-heading" class="gradient-text">{"Blog & Insights"}</h2>
                <p>{blog.intro.clone()}</p>
            </header>

            <div class="glass-card blog-placeholder">
                <div class="emoji" aria-hidden="true">{"📝"}</div>
                <h3>{blog.placeholder_title.clone()}</h3>
                <p>{blog.placeholder_body.clone()}</p>
            </div>

            <div class="glass-card newsletter">
                <div class="emoji" aria-hidden="true">{"📬"}</div>
                <h3>{"Stay Updated"}</h3>
                <p>{"Get notified when I publish new articles about software development, AI, and technology trends."}</p>
                <div class="newsletter-row">
                    <input type="email" placeholder="Enter your email" aria-label="Email address" />
                    <button class="button button-primary" type="button">{"Subscribe"}</button>
                </div>
                <p class="fine-print">{"No spam, ever. Unsubscribe at any time."}</p>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactSectionProps {
    pub content: Rc<SiteContent>,
    pub submit_delay_ms: u32,
}

fn field_value(event: &InputEvent) -> String {
    event
        .target_dyn_into::<HtmlInputElement>()
        .map(|input| input.value())
        .or_else(|| {
            event
                .target_dyn_into::<HtmlTextAreaElement>()
                .map(|area| area.value())
        })
        .unwrap_or_default()
}

#[function_component(ContactSection)]
pub fn contact_section(props: &ContactSectionProps) -> Html {
    let (reveal_ref, revealed) = use_reveal();
    let form = use_state(ContactForm::default);
    let error = use_state(|| None::<String>);
    let details = &props.content.contact;

    let on_field = |field: ContactField| {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let mut next = (*form).clone();
            next.update(field, field_value(&event));
            form.set(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let error = error.clone();
        let delay_ms = props.submit_delay_ms;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let mut next = (*form).clone();
            if let Err(reason) = next.begin_submit() {
                log_event(
                    LogLevel::Info,
                    "contact_validation_failed",
                    serde_json::json!({ "reason": reason.as_str() }),
                );
                error.set(Some(reason.message()));
                return;
            }

            error.set(None);
            form.set(next.clone());
            log_event(
                LogLevel::Info,
                "contact_submit_started",
                serde_json::json!({ "delay_ms": delay_ms }),
            );

            let form = form.clone();
            spawn_local(async move {
                sleep_ms(delay_ms).await;
                next.complete_submit();
                form.set(next);
                log_event(LogLevel::Info, "contact_submit_complete", serde_json::json!({}));
            });
        })
    };

    let submitting = form.is_submitting();
    let button_label = match form.status {
        SubmitStatus::Submitting => "Sending...",
        SubmitStatus::Editing | SubmitStatus::Sent => "Send Message",
    };

    html! {
        <section
            id="contact"
            ref={reveal_ref}
            class={classes!("section-block", "section-contact", "reveal", revealed.then_some("is-visible"))}
            aria-labelledby="contact-heading"
        >
            <header class="section-header">
                <h2 id="contact-heading" class="gradient-text">{details.heading.clone()}</h2>
                <p>{details.intro.clone()}</p>
            </header>

            <div class="two-column">
                <div class="stack">
                    <div class="glass-card">
                        <h3>{"Get In Touch"}</h3>
                        <dl class="contact-details">
                            <dt>{"Email"}</dt>
                            <dd><a class="link" href={format!("mailto:{}", details.email)}>{details.email.clone()}</a></dd>
                            <dt>{"Location"}</dt>
                            <dd>{details.location.clone()}</dd>
                            <dt>{"Availability"}</dt>
                            <dd>{details.availability.clone()}</dd>
                        </dl>
                    </div>

                    <div class="glass-card">
                        <h3>{"Connect With Me"}</h3>
                        <div class="contact-socials">
                            {social_links(props.content.contact_socials(), "social-tile")}
                        </div>
                        <p class="muted">{"Follow me for updates on my latest projects and tech insights."}</p>
                    </div>
                </div>

                <form class="glass-card contact-form" onsubmit={on_submit} novalidate={true}>
                    <h3>{"Send a Message"}</h3>
                    <label>
                        {ContactField::Name.label()}
                        <input type="text" value={form.name.clone()} oninput={on_field(ContactField::Name)} disabled={submitting} />
                    </label>
                    <label>
                        {ContactField::Email.label()}
                        <input type="email" value={form.email.clone()} oninput={on_field(ContactField::Email)} disabled={submitting} />
                    </label>
                    <label>
                        {ContactField::Subject.label()}
                        <input type="text" value={form.subject.clone()} oninput={on_field(ContactField::Subject)} disabled={submitting} />
                    </label>
                    <label>
                        {ContactField::Message.label()}
                        <textarea rows="5" value={form.message.clone()} oninput={on_field(ContactField::Message)} disabled={submitting} />
                    </label>

                    if let Some(message) = (*error).clone() {
                        <p class="form-error" role="alert">{message}</p>
                    }
                    if form.status == SubmitStatus::Sent {
                        <p class="form-success" role="status">{"Thanks! Your message has been sent."}</p>
                    }

                    <button class="button button-primary" type="submit" disabled={submitting}>
                        {button_label}
                    </button>
                </form>
            </div>

            <footer class="site-footer">
                <p>{details.footer.clone()}</p>
                <p class="muted">{details.footer_note.clone()}</p>
            </footer>
        </section>
    }
}
