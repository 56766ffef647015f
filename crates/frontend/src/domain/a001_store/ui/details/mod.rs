use contracts::domain::a001_store::{CreateStoreDto, DEFAULT_COMMISSION_RATE};
use leptos::prelude::*;
use thaw::*;

/// Форма создания магазина вместе с его администратором
#[component]
pub fn CreateStoreForm(on_close: Callback<()>, on_submit: Callback<CreateStoreDto>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let subdomain = RwSignal::new(String::new());
    let admin_name = RwSignal::new(String::new());
    let admin_email = RwSignal::new(String::new());
    let admin_password = RwSignal::new(String::new());
    let commission = RwSignal::new(DEFAULT_COMMISSION_RATE.to_string());
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move |_| {
        let rate = match commission.get().trim().parse::<f64>() {
            Ok(rate) => rate,
            Err(_) => {
                set_error.set(Some("Commission rate must be a number".to_string()));
                return;
            }
        };
        let password = admin_password.get();
        let dto = CreateStoreDto {
            name: name.get().trim().to_string(),
            subdomain: subdomain.get().trim().to_lowercase(),
            admin_name: admin_name.get().trim().to_string(),
            admin_email: admin_email.get().trim().to_string(),
            admin_password: (!password.is_empty()).then_some(password),
            commission_rate: Some(rate),
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
                    <h2>"New Store"</h2>
                </div>
                <div class="modal__body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                    <Flex vertical=true gap=FlexGap::Small>
                        <label>"Store name"</label>
                        <Input value=name placeholder="Tech Gadgets Pro" />
                        <label>"Subdomain"</label>
                        <Input value=subdomain placeholder="techgadgets" />
                        <label>"Admin name"</label>
                        <Input value=admin_name />
                        <label>"Admin email"</label>
                        <Input value=admin_email input_type=InputType::Email />
                        <label>"Admin password (optional, generated when empty)"</label>
                        <Input value=admin_password input_type=InputType::Password />
                        <label>"Commission rate, %"</label>
                        <Input value=commission />
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
