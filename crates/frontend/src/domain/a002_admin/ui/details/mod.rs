use contracts::domain::a002_admin::CreateAdminDto;
use leptos::prelude::*;
use thaw::*;

const ROLES: [&str; 3] = ["Super Admin", "Store Manager", "Support Agent"];

#[component]
pub fn CreateAdminForm(on_close: Callback<()>, on_submit: Callback<CreateAdminDto>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let role = RwSignal::new(ROLES[1].to_string());
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |_| {
        let dto = CreateAdminDto {
            name: name.get().trim().to_string(),
            email: email.get().trim().to_string(),
            phone: phone.get().trim().to_string(),
            role: role.get(),
            permissions: Vec::new(),
        };
        match dto.validate() {
            Ok(()) => on_submit.run(dto),
            Err(e) => set_error.set(Some(e)),
        }
    };

    view! {
        <div class="modal-overlay">
            <div class="modal">
                <div class="modal__header">
                    <h2>"New Admin"</h2>
                </div>
                <div class="modal__body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                    <Flex vertical=true gap=FlexGap::Small>
                        <label>"Name"</label>
                        <Input value=name />
                        <label>"Email"</label>
                        <Input value=email input_type=InputType::Email />
                        <label>"Phone"</label>
                        <Input value=phone />
                        <label>"Role"</label>
                        <select
                            prop:value=move || role.get()
                            on:change=move |ev| role.set(event_target_value(&ev))
                        >
                            {ROLES.iter().map(|r| view! { <option value=*r>{*r}</option> }).collect_view()}
                        </select>
                    </Flex>
                </div>
                <div class="modal__footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Cancel"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=submit>
                        "Create"
                    </Button>
                </div>
            </div>
        </div>
    }
}
