//! Generated method facade
//!
//! One entry per remote method. Each entry produces a row in
//! [`API_METHODS`] and a thin `ApiClient` method that forwards to
//! [`ApiClient::call_with_auth`].

use serde_json::Value;
use zabbix_protocol::Params;

use super::ApiMethod;
use crate::client::{ApiClient, ApiResult};

macro_rules! api_methods {
    (@auth) => {
        true
    };
    (@auth $auth:literal) => {
        $auth
    };
    ($($facade:ident => $method:literal $(, auth = $auth:literal)?;)*) => {
        /// Every remote method the facade exposes, in declaration order.
        pub const API_METHODS: &[ApiMethod] = &[
            $(ApiMethod {
                method: $method,
                facade: stringify!($facade),
                requires_auth: api_methods!(@auth $($auth)?),
            },)*
        ];

        impl ApiClient {
            $(
                #[doc = concat!("Call `", $method, "`.")]
                pub fn $facade(
                    &mut self,
                    params: impl Into<Params>,
                    rekey_property: &str,
                ) -> ApiResult<Value> {
                    self.call_with_auth($method, params, rekey_property, api_methods!(@auth $($auth)?))
                }
            )*
        }
    };
}

api_methods! {
    action_get => "action.get";
    action_exists => "action.exists";
    action_create => "action.create";
    action_update => "action.update";
    action_delete => "action.delete";
    action_validate_operations => "action.validateOperations";
    action_validate_conditions => "action.validateConditions";
    action_validate_operation_conditions => "action.validateOperationConditions";

    alert_get => "alert.get";

    apiinfo_version => "apiinfo.version", auth = false;

    application_get => "application.get";
    application_exists => "application.exists";
    application_check_input => "application.checkInput";
    application_create => "application.create";
    application_update => "application.update";
    application_delete => "application.delete";
    application_mass_add => "application.massAdd";
    application_sync_templates => "application.syncTemplates";

    configuration_export => "configuration.export";
    configuration_import => "configuration.import";

    dcheck_get => "dcheck.get";
    dcheck_is_readable => "dcheck.isReadable";
    dcheck_is_writable => "dcheck.isWritable";

    dhost_get => "dhost.get";
    dhost_exists => "dhost.exists";
    dhost_create => "dhost.create";
    dhost_update => "dhost.update";
    dhost_delete => "dhost.delete";

    discoveryrule_get => "discoveryrule.get";
    discoveryrule_exists => "discoveryrule.exists";
    discoveryrule_create => "discoveryrule.create";
    discoveryrule_update => "discoveryrule.update";
    discoveryrule_delete => "discoveryrule.delete";
    discoveryrule_copy => "discoveryrule.copy";
    discoveryrule_sync_templates => "discoveryrule.syncTemplates";
    discoveryrule_is_readable => "discoveryrule.isReadable";
    discoveryrule_is_writable => "discoveryrule.isWritable";
    discoveryrule_find_interface_for_item => "discoveryrule.findInterfaceForItem";

    drule_get => "drule.get";
    drule_exists => "drule.exists";
    drule_check_input => "drule.checkInput";
    drule_create => "drule.create";
    drule_update => "drule.update";
    drule_delete => "drule.delete";
    drule_is_readable => "drule.isReadable";
    drule_is_writable => "drule.isWritable";

    dservice_get => "dservice.get";
    dservice_exists => "dservice.exists";
    dservice_create => "dservice.create";
    dservice_update => "dservice.update";
    dservice_delete => "dservice.delete";

    event_get => "event.get";
    event_acknowledge => "event.acknowledge";

    graph_get => "graph.get";
    graph_sync_templates => "graph.syncTemplates";
    graph_delete => "graph.delete";
    graph_update => "graph.update";
    graph_create => "graph.create";
    graph_exists => "graph.exists";
    graph_get_objects => "graph.getObjects";

    graphitem_get => "graphitem.get";
    graphitem_get_objects => "graphitem.getObjects";

    graphprototype_get => "graphprototype.get";
    graphprototype_sync_templates => "graphprototype.syncTemplates";
    graphprototype_delete => "graphprototype.delete";
    graphprototype_update => "graphprototype.update";
    graphprototype_create => "graphprototype.create";
    graphprototype_exists => "graphprototype.exists";
    graphprototype_get_objects => "graphprototype.getObjects";

    host_get => "host.get";
    host_get_objects => "host.getObjects";
    host_exists => "host.exists";
    host_create => "host.create";
    host_update => "host.update";
    host_mass_add => "host.massAdd";
    host_mass_update => "host.massUpdate";
    host_mass_remove => "host.massRemove";
    host_delete => "host.delete";
    host_is_readable => "host.isReadable";
    host_is_writable => "host.isWritable";

    hostgroup_get => "hostgroup.get";
    hostgroup_get_objects => "hostgroup.getObjects";
    hostgroup_exists => "hostgroup.exists";
    hostgroup_create => "hostgroup.create";
    hostgroup_update => "hostgroup.update";
    hostgroup_delete => "hostgroup.delete";
    hostgroup_mass_add => "hostgroup.massAdd";
    hostgroup_mass_remove => "hostgroup.massRemove";
    hostgroup_mass_update => "hostgroup.massUpdate";
    hostgroup_is_readable => "hostgroup.isReadable";
    hostgroup_is_writable => "hostgroup.isWritable";

    history_get => "history.get";
    history_create => "history.create";
    history_delete => "history.delete";

    hostinterface_get => "hostinterface.get";
    hostinterface_exists => "hostinterface.exists";
    hostinterface_check_input => "hostinterface.checkInput";
    hostinterface_create => "hostinterface.create";
    hostinterface_update => "hostinterface.update";
    hostinterface_delete => "hostinterface.delete";
    hostinterface_mass_add => "hostinterface.massAdd";
    hostinterface_mass_remove => "hostinterface.massRemove";
    hostinterface_replace_host_interfaces => "hostinterface.replaceHostInterfaces";

    image_get => "image.get";
    image_get_objects => "image.getObjects";
    image_exists => "image.exists";
    image_create => "image.create";
    image_update => "image.update";
    image_delete => "image.delete";

    iconmap_get => "iconmap.get";
    iconmap_create => "iconmap.create";
    iconmap_update => "iconmap.update";
    iconmap_delete => "iconmap.delete";
    iconmap_is_readable => "iconmap.isReadable";
    iconmap_is_writable => "iconmap.isWritable";

    item_get => "item.get";
    item_get_objects => "item.getObjects";
    item_exists => "item.exists";
    item_create => "item.create";
    item_update => "item.update";
    item_delete => "item.delete";
    item_sync_templates => "item.syncTemplates";
    item_validate_inventory_links => "item.validateInventoryLinks";
    item_add_related_objects => "item.addRelatedObjects";
    item_find_interface_for_item => "item.findInterfaceForItem";
    item_is_readable => "item.isReadable";
    item_is_writable => "item.isWritable";

    itemprototype_get => "itemprototype.get";
    itemprototype_exists => "itemprototype.exists";
    itemprototype_create => "itemprototype.create";
    itemprototype_update => "itemprototype.update";
    itemprototype_delete => "itemprototype.delete";
    itemprototype_sync_templates => "itemprototype.syncTemplates";
    itemprototype_find_interface_for_item => "itemprototype.findInterfaceForItem";
    itemprototype_is_readable => "itemprototype.isReadable";
    itemprototype_is_writable => "itemprototype.isWritable";

    maintenance_get => "maintenance.get";
    maintenance_exists => "maintenance.exists";
    maintenance_create => "maintenance.create";
    maintenance_update => "maintenance.update";
    maintenance_delete => "maintenance.delete";

    map_get => "map.get";
    map_get_objects => "map.getObjects";
    map_exists => "map.exists";
    map_check_input => "map.checkInput";
    map_create => "map.create";
    map_update => "map.update";
    map_delete => "map.delete";
    map_is_readable => "map.isReadable";
    map_is_writable => "map.isWritable";
    map_check_circle_selements_link => "map.checkCircleSelementsLink";

    mediatype_get => "mediatype.get";
    mediatype_create => "mediatype.create";
    mediatype_update => "mediatype.update";
    mediatype_delete => "mediatype.delete";

    proxy_get => "proxy.get";
    proxy_create => "proxy.create";
    proxy_update => "proxy.update";
    proxy_delete => "proxy.delete";
    proxy_is_readable => "proxy.isReadable";
    proxy_is_writable => "proxy.isWritable";

    service_get => "service.get";
    service_create => "service.create";
    service_validate_update => "service.validateUpdate";
    service_update => "service.update";
    service_validate_delete => "service.validateDelete";
    service_delete => "service.delete";
    service_add_dependencies => "service.addDependencies";
    service_delete_dependencies => "service.deleteDependencies";
    service_validate_add_times => "service.validateAddTimes";
    service_add_times => "service.addTimes";
    service_get_sla => "service.getSla";
    service_delete_times => "service.deleteTimes";
    service_is_readable => "service.isReadable";
    service_is_writable => "service.isWritable";
    service_expand_periodical_times => "service.expandPeriodicalTimes";

    screen_get => "screen.get";
    screen_exists => "screen.exists";
    screen_create => "screen.create";
    screen_update => "screen.update";
    screen_delete => "screen.delete";

    screenitem_get => "screenitem.get";
    screenitem_create => "screenitem.create";
    screenitem_update => "screenitem.update";
    screenitem_update_by_position => "screenitem.updateByPosition";
    screenitem_delete => "screenitem.delete";
    screenitem_is_readable => "screenitem.isReadable";
    screenitem_is_writable => "screenitem.isWritable";

    script_get => "script.get";
    script_get_objects => "script.getObjects";
    script_create => "script.create";
    script_update => "script.update";
    script_delete => "script.delete";
    script_execute => "script.execute";
    script_get_scripts_by_hosts => "script.getScriptsByHosts";

    template_pk_option => "template.pkOption";
    template_get => "template.get";
    template_get_objects => "template.getObjects";
    template_exists => "template.exists";
    template_create => "template.create";
    template_update => "template.update";
    template_delete => "template.delete";
    template_mass_add => "template.massAdd";
    template_mass_update => "template.massUpdate";
    template_mass_remove => "template.massRemove";
    template_is_readable => "template.isReadable";
    template_is_writable => "template.isWritable";

    templatescreen_get => "templatescreen.get";
    templatescreen_exists => "templatescreen.exists";
    templatescreen_create => "templatescreen.create";
    templatescreen_update => "templatescreen.update";
    templatescreen_delete => "templatescreen.delete";
    templatescreen_copy => "templatescreen.copy";
    templatescreen_is_readable => "templatescreen.isReadable";
    templatescreen_is_writable => "templatescreen.isWritable";

    templatescreenitem_get => "templatescreenitem.get";

    trigger_get => "trigger.get";
    trigger_get_objects => "trigger.getObjects";
    trigger_exists => "trigger.exists";
    trigger_check_input => "trigger.checkInput";
    trigger_create => "trigger.create";
    trigger_update => "trigger.update";
    trigger_delete => "trigger.delete";
    trigger_add_dependencies => "trigger.addDependencies";
    trigger_delete_dependencies => "trigger.deleteDependencies";
    trigger_sync_templates => "trigger.syncTemplates";
    trigger_sync_template_dependencies => "trigger.syncTemplateDependencies";
    trigger_is_readable => "trigger.isReadable";
    trigger_is_writable => "trigger.isWritable";

    triggerprototype_get => "triggerprototype.get";
    triggerprototype_create => "triggerprototype.create";
    triggerprototype_update => "triggerprototype.update";
    triggerprototype_delete => "triggerprototype.delete";
    triggerprototype_sync_templates => "triggerprototype.syncTemplates";

    user_get => "user.get";
    user_create => "user.create";
    user_update => "user.update";
    user_update_profile => "user.updateProfile";
    user_delete => "user.delete";
    user_add_media => "user.addMedia";
    user_delete_media => "user.deleteMedia";
    user_update_media => "user.updateMedia";
    user_check_authentication => "user.checkAuthentication";
    user_is_readable => "user.isReadable";
    user_is_writable => "user.isWritable";

    usergroup_get => "usergroup.get";
    usergroup_get_objects => "usergroup.getObjects";
    usergroup_exists => "usergroup.exists";
    usergroup_create => "usergroup.create";
    usergroup_update => "usergroup.update";
    usergroup_mass_add => "usergroup.massAdd";
    usergroup_mass_update => "usergroup.massUpdate";
    usergroup_mass_remove => "usergroup.massRemove";
    usergroup_delete => "usergroup.delete";
    usergroup_is_readable => "usergroup.isReadable";
    usergroup_is_writable => "usergroup.isWritable";

    usermacro_get => "usermacro.get";
    usermacro_create_global => "usermacro.createGlobal";
    usermacro_update_global => "usermacro.updateGlobal";
    usermacro_delete_global => "usermacro.deleteGlobal";
    usermacro_create => "usermacro.create";
    usermacro_update => "usermacro.update";
    usermacro_delete => "usermacro.delete";
    usermacro_get_macros => "usermacro.getMacros";
    usermacro_resolve_trigger => "usermacro.resolveTrigger";
    usermacro_resolve_item => "usermacro.resolveItem";
    usermacro_replace_macros => "usermacro.replaceMacros";

    usermedia_get => "usermedia.get";

    webcheck_get => "webcheck.get";
    webcheck_create => "webcheck.create";
    webcheck_update => "webcheck.update";
    webcheck_delete => "webcheck.delete";
    webcheck_is_readable => "webcheck.isReadable";
    webcheck_is_writable => "webcheck.isWritable";
}
