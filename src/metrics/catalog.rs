//! Static sensor catalog.

use crate::metrics::{MetricDefinition, MetricGroup};

const fn metric(
    id: &'static str,
    name: &'static str,
    unit: &'static str,
    category: &'static str,
    label: &'static str,
    group: MetricGroup,
) -> MetricDefinition {
    MetricDefinition {
        id,
        name,
        unit,
        category,
        label,
        group,
    }
}

/// Every sensor the integration exposes, one entry per field id.
pub static METRIC_CATALOG: &[MetricDefinition] = &[
    // Physical Metrics
    metric("weight", "Weight", "kg", "Measurements", "Physical Metrics", MetricGroup::Weight),
    metric("bmi", "BMI", "", "Measurements", "Physical Metrics", MetricGroup::Weight),
    metric("muscle", "Muscle Mass", "%", "Measurements", "Physical Metrics", MetricGroup::Weight),
    metric("bone", "Bone Mass", "%", "Measurements", "Physical Metrics", MetricGroup::Weight),
    metric("waistline", "Waistline", "cm", "Measurements", "Physical Metrics", MetricGroup::Weight),
    metric("hip", "Hip", "cm", "Measurements", "Physical Metrics", MetricGroup::Weight),
    metric("stature", "Stature", "cm", "Measurements", "Physical Metrics", MetricGroup::Weight),
    // Body Composition
    metric("bodyfat", "Body Fat", "%", "Measurements", "Body Composition", MetricGroup::Weight),
    metric("water", "Water Content", "%", "Measurements", "Body Composition", MetricGroup::Weight),
    metric("subfat", "Subcutaneous Fat", "%", "Measurements", "Body Composition", MetricGroup::Weight),
    metric("visfat", "Visceral Fat", "Level", "Measurements", "Body Composition", MetricGroup::Weight),
    // Metabolic Metrics
    metric("bmr", "BMR", "kcal/day", "Measurements", "Metabolic Metrics", MetricGroup::Weight),
    metric("protein", "Protein Content", "%", "Measurements", "Metabolic Metrics", MetricGroup::Weight),
    // Age Metrics
    metric("bodyage", "Body Age", "Years", "Measurements", "Age Metrics", MetricGroup::Weight),
    // Device Information
    metric("mac", "MAC Address", "", "Device", "Device Information", MetricGroup::Weight),
    metric("scale_type", "Scale Type", "", "Device", "Device Information", MetricGroup::Weight),
    metric("scale_name", "Scale Name", "", "Device", "Device Information", MetricGroup::Weight),
    // Additional Metrics
    metric("method", "Measurement Method", "", "Miscellaneous", "Additional Metrics", MetricGroup::Weight),
    metric("pregnant_flag", "Pregnant Flag", "", "Miscellaneous", "Additional Metrics", MetricGroup::Weight),
    metric("sport_flag", "Sport Flag", "", "Miscellaneous", "Additional Metrics", MetricGroup::Weight),
    metric("score", "Score", "", "Miscellaneous", "Additional Metrics", MetricGroup::Weight),
    metric("remark", "Remark", "", "Miscellaneous", "Additional Metrics", MetricGroup::Weight),
    // Meta Information
    metric("id", "Record ID", "", "Meta", "Meta Information", MetricGroup::Weight),
    metric("b_user_id", "User ID", "", "Meta", "Meta Information", MetricGroup::Weight),
    metric("time_stamp", "Time Stamp", "UNIX Time", "Meta", "Meta Information", MetricGroup::Weight),
    metric("created_at", "Created At", "", "Meta", "Meta Information", MetricGroup::Weight),
    // User Profile
    metric("gender", "Gender", "", "User", "User Profile", MetricGroup::Weight),
    metric("height", "Height", "cm", "User", "User Profile", MetricGroup::Weight),
    metric("birthday", "Birthday", "", "User", "User Profile", MetricGroup::Weight),
    // Electrical Measurements
    metric("resistance", "Electrical Resistance", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    metric("sec_resistance", "Secondary Electrical Resistance", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    metric("actual_resistance", "Actual Electrical Resistance", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    metric("actual_sec_resistance", "Actual Secondary Electrical Resistance", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    metric("resistance20_left_arm", "Resistance20 Left Arm", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    metric("resistance20_left_leg", "Resistance20 Left Leg", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    metric("resistance20_right_arm", "Resistance20 Right Arm", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    metric("resistance20_right_leg", "Resistance20 Right Leg", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    metric("resistance20_trunk", "Resistance20 Trunk", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    metric("resistance100_left_arm", "Resistance100 Left Arm", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    metric("resistance100_left_leg", "Resistance100 Left Leg", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    metric("resistance100_right_arm", "Resistance100 Right Arm", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    metric("resistance100_right_leg", "Resistance100 Right Leg", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    metric("resistance100_trunk", "Resistance100 Trunk", "Ohms", "Measurements", "Electrical Measurements", MetricGroup::Weight),
    // Cardiovascular Metrics
    metric("heart_rate", "Heart Rate", "bpm", "Measurements", "Cardiovascular Metrics", MetricGroup::Weight),
    metric("cardiac_index", "Cardiac Index", "", "Measurements", "Cardiovascular Metrics", MetricGroup::Weight),
    // Other Metrics
    metric("left_weight", "Left Weight", "kg", "Measurements", "Other Metrics", MetricGroup::Weight),
    metric("right_weight", "Right Weight", "kg", "Measurements", "Other Metrics", MetricGroup::Weight),
    metric("local_created_at", "Local Created At", "", "Meta", "Other Metrics", MetricGroup::Weight),
    metric("category", "Category Identifier", "", "Miscellaneous", "Other Metrics", MetricGroup::Weight),
    // Girth Measurements
    metric("neck_value", "Neck Value", "cm", "Measurements", "Girth Measurements", MetricGroup::Girth),
    metric("shoulder_value", "Shoulder Value", "cm", "Measurements", "Girth Measurements", MetricGroup::Girth),
    metric("left_arm_value", "Left Arm Value", "cm", "Measurements", "Girth Measurements", MetricGroup::Girth),
    metric("right_arm_value", "Right Arm Value", "cm", "Measurements", "Girth Measurements", MetricGroup::Girth),
    metric("chest_value", "Chest Value", "cm", "Measurements", "Girth Measurements", MetricGroup::Girth),
    metric("waist_value", "Waist Value", "cm", "Measurements", "Girth Measurements", MetricGroup::Girth),
    metric("hip_value", "Hip Value", "cm", "Measurements", "Girth Measurements", MetricGroup::Girth),
    metric("left_thigh_value", "Left Thigh Value", "cm", "Measurements", "Girth Measurements", MetricGroup::Girth),
    metric("right_thigh_value", "Right Thigh Value", "cm", "Measurements", "Girth Measurements", MetricGroup::Girth),
    metric("left_calf_value", "Left Calf Value", "cm", "Measurements", "Girth Measurements", MetricGroup::Girth),
    metric("right_calf_value", "Right Calf Value", "cm", "Measurements", "Girth Measurements", MetricGroup::Girth),
    metric("whr_value", "WHR Value", "ratio", "Measurements", "Girth Measurements", MetricGroup::Girth),
    metric("abdomen_value", "Abdomen Value", "cm", "Measurements", "Girth Measurements", MetricGroup::Girth),
    // Girth Goals
    metric("neck_goal_value", "Neck Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("shoulder_goal_value", "Shoulder Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("arm_goal_value", "Arm Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("chest_goal_value", "Chest Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("waist_goal_value", "Waist Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("hip_goal_value", "Hip Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("thigh_goal_value", "Thigh Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("calf_goal_value", "Calf Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("left_arm_goal_value", "Left Arm Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("left_thigh_goal_value", "Left Thigh Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("left_calf_goal_value", "Left Calf Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("right_arm_goal_value", "Right Arm Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("right_thigh_goal_value", "Right Thigh Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("right_calf_goal_value", "Right Calf Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("whr_goal_value", "WHR Goal Value", "ratio", "Goals", "Girth Goals", MetricGroup::GirthGoals),
    metric("abdomen_goal_value", "Abdomen Goal Value", "cm", "Goals", "Girth Goals", MetricGroup::GirthGoals),
];
